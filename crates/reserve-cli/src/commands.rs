//! One-shot subcommands. Each maps to a single registry operation.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use reserve_core::{
  PersistWarning,
  candidate::{Candidate, CandidateId, CandidatePatch, Profile, Score, Status},
  faq::FAQ,
  filter::{CandidateFilter, ContributionFilter, StatusFilter},
  registry::Registry,
  store::EntryStore,
};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
  /// Open the interactive terminal UI (the default)
  Tui,
  /// List candidates, optionally filtered
  List {
    /// Case-insensitive text matched against every field
    #[arg(short, long, default_value = "")]
    search:       String,
    /// `all` or a status id such as `en_lecture`
    #[arg(long, default_value = "all")]
    status:       StatusFilter,
    /// `all`, `yes` or `no`
    #[arg(long, default_value = "all")]
    contribution: ContributionFilter,
    /// Print JSON instead of a table
    #[arg(long)]
    json:         bool,
  },
  /// Register a new candidate
  Add(AddArgs),
  /// Change a candidate's status
  Status { id: CandidateId, status: Status },
  /// Set one or both evaluation scores (0 to 5)
  Score {
    id:         CandidateId,
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=5))]
    motivation: Option<u8>,
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=5))]
    curiosity:  Option<u8>,
  },
  /// Delete a candidate
  Delete {
    id:  CandidateId,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
  },
  /// Show the summary counters
  Stats {
    #[arg(long)]
    json: bool,
  },
  /// Print the FAQ
  Faq,
}

/// Every field is optional except `--iban` when `--cotisant` is set.
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
  #[arg(long)]
  prenom:        Option<String>,
  #[arg(long)]
  nom:           Option<String>,
  #[arg(long)]
  email:         Option<String>,
  #[arg(long)]
  telephone:     Option<String>,
  #[arg(long)]
  localisation:  Option<String>,
  #[arg(long)]
  linkedin:      Option<String>,
  #[arg(long)]
  site:          Option<String>,
  #[arg(long)]
  disponibilite: Option<String>,
  #[arg(long)]
  motivation:    Option<String>,
  #[arg(long)]
  curiosite:     Option<String>,
  #[arg(long)]
  competences:   Option<String>,
  #[arg(long)]
  commentaire:   Option<String>,
  /// Pay the annual contribution (12,50€/an); requires --iban
  #[arg(long)]
  cotisant:      bool,
  #[arg(long)]
  iban:          Option<String>,
}

impl From<AddArgs> for Profile {
  fn from(a: AddArgs) -> Self {
    Profile {
      first_name:   a.prenom.unwrap_or_default(),
      last_name:    a.nom.unwrap_or_default(),
      email:        a.email.unwrap_or_default(),
      phone:        a.telephone.unwrap_or_default(),
      location:     a.localisation.unwrap_or_default(),
      linkedin:     a.linkedin.unwrap_or_default(),
      website:      a.site.unwrap_or_default(),
      availability: a.disponibilite.unwrap_or_default(),
      motivation:   a.motivation.unwrap_or_default(),
      curiosity:    a.curiosite.unwrap_or_default(),
      skills:       a.competences.unwrap_or_default(),
      comment:      a.commentaire.unwrap_or_default(),
      contributor:  a.cotisant,
      iban:         a.iban.unwrap_or_default(),
    }
  }
}

pub async fn handle<S: EntryStore>(mut registry: Registry<S>, command: Command) -> Result<()> {
  match command {
    // Dispatched by `main`; nothing to do here.
    Command::Tui => {}

    Command::List { search, status, contribution, json } => {
      let filter = CandidateFilter { search, status, contribution };
      let visible = filter.apply(registry.candidates());
      if json {
        println!("{}", serde_json::to_string_pretty(&visible).context("serialising candidates")?);
      } else if visible.is_empty() {
        if registry.candidates().is_empty() {
          println!("Aucun profil – inscrivez-vous !");
        } else {
          println!("Aucun profil trouvé");
        }
      } else {
        for c in visible {
          println!("{}", list_line(c));
        }
      }
    }

    Command::Add(args) => {
      let created = registry.create(args.into()).await?;
      println!("{}", created.value.id);
      report(created.warning);
    }

    Command::Status { id, status } => {
      let updated = registry.update(id, CandidatePatch::status(status)).await;
      ensure_found(id, updated.value)?;
      report(updated.warning);
    }

    Command::Score { id, motivation, curiosity } => {
      if motivation.is_none() && curiosity.is_none() {
        bail!("nothing to update: pass --motivation and/or --curiosity");
      }
      let patch = CandidatePatch {
        motivation_score: motivation.map(Score::new).transpose()?,
        curiosity_score: curiosity.map(Score::new).transpose()?,
        ..CandidatePatch::default()
      };
      let updated = registry.update(id, patch).await;
      ensure_found(id, updated.value)?;
      report(updated.warning);
    }

    Command::Delete { id, yes } => {
      ensure_found(id, registry.get(id).is_some())?;
      if !yes && !confirm("Supprimer ce profil ?")? {
        println!("Suppression annulée.");
        return Ok(());
      }
      let deleted = registry.delete(id).await;
      report(deleted.warning);
    }

    Command::Stats { json } => {
      let stats = registry.stats();
      if json {
        println!("{}", serde_json::to_string_pretty(&stats).context("serialising stats")?);
      } else {
        println!("Profils      {}", stats.total);
        println!("Cotisants    {}", stats.contributors);
        println!("Connecté·es  {}", stats.connected);
      }
    }

    Command::Faq => {
      for (i, entry) in FAQ.iter().enumerate() {
        if i > 0 {
          println!();
        }
        println!("{}", entry.question);
        for line in entry.answer.lines() {
          println!("  {line}");
        }
      }
    }
  }
  Ok(())
}

/// One row of `reserve list`.
pub fn list_line(c: &Candidate) -> String {
  let badge = if c.profile.contributor { "€" } else { " " };
  format!(
    "{:>13}  {badge} {:<28} {:<18} M:{}/5 C:{}/5  {}",
    c.id,
    truncate(&c.display_name(), 28),
    c.status.label(),
    c.motivation_score,
    c.curiosity_score,
    c.profile.email,
  )
  .trim_end()
  .to_owned()
}

/// Shorten `s` to at most `max` characters, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    return s.to_owned();
  }
  let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
  out.push('…');
  out
}

fn ensure_found(id: CandidateId, found: bool) -> Result<()> {
  if found { Ok(()) } else { Err(reserve_core::Error::CandidateNotFound(id).into()) }
}

fn report(warning: Option<PersistWarning>) {
  if let Some(w) = warning {
    eprintln!("warning: {w}");
  }
}

fn confirm(question: &str) -> Result<bool> {
  print!("{question} [y/N] ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin()
    .lock()
    .read_line(&mut line)
    .context("reading confirmation")?;
  Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes" | "o" | "oui"))
}
