//! The dashboard's filter projection over the candidate list.

use std::str::FromStr;

use crate::{
  Error, Result,
  candidate::{Candidate, Status},
};

/// Restrict the list to one status, or not at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
  #[default]
  All,
  Only(Status),
}

impl StatusFilter {
  pub fn label(&self) -> String {
    match self {
      Self::All => "Tous statuts".to_owned(),
      Self::Only(status) => status.label().into_owned(),
    }
  }

  /// Cycle `All → first status → ... → last status → All`.
  pub fn next(&self) -> Self {
    match self {
      Self::All => Self::Only(Status::ALL[0].clone()),
      Self::Only(status) if *status == Status::LoremGamma => Self::All,
      Self::Only(status) if !status.is_known() => Self::All,
      Self::Only(status) => Self::Only(status.next()),
    }
  }
}

/// Accepts `all`/`tous` or a status id.
impl FromStr for StatusFilter {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim() {
      "" | "all" | "tous" => Ok(Self::All),
      other => other.parse().map(Self::Only),
    }
  }
}

/// Restrict the list by contribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContributionFilter {
  #[default]
  All,
  Yes,
  No,
}

impl ContributionFilter {
  pub fn label(self) -> &'static str {
    match self {
      Self::All => "Cotisation",
      Self::Yes => "Cotisants",
      Self::No => "Non-cotisants",
    }
  }

  pub fn next(self) -> Self {
    match self {
      Self::All => Self::Yes,
      Self::Yes => Self::No,
      Self::No => Self::All,
    }
  }

  fn accepts(self, contributor: bool) -> bool {
    match self {
      Self::All => true,
      Self::Yes => contributor,
      Self::No => !contributor,
    }
  }
}

/// Accepts `all`/`tous`, `yes`/`oui`, `no`/`non`.
impl FromStr for ContributionFilter {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_lowercase().as_str() {
      "" | "all" | "tous" => Ok(Self::All),
      "yes" | "oui" => Ok(Self::Yes),
      "no" | "non" => Ok(Self::No),
      _ => Err(Error::UnknownFilter(s.to_owned())),
    }
  }
}

/// Search term plus the two select filters; all three must pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateFilter {
  /// Case-insensitive substring matched against every field.
  pub search:       String,
  pub status:       StatusFilter,
  pub contribution: ContributionFilter,
}

impl CandidateFilter {
  pub fn is_empty(&self) -> bool { *self == Self::default() }

  pub fn matches(&self, candidate: &Candidate) -> bool {
    self.matches_with(&self.search.to_lowercase(), candidate)
  }

  /// The candidates that pass, in their original order.
  pub fn apply<'a>(&self, candidates: &'a [Candidate]) -> Vec<&'a Candidate> {
    let needle = self.search.to_lowercase();
    candidates
      .iter()
      .filter(|c| self.matches_with(&needle, c))
      .collect()
  }

  fn matches_with(&self, needle: &str, candidate: &Candidate) -> bool {
    let search_ok = needle.is_empty()
      || candidate
        .field_strings()
        .iter()
        .any(|field| field.to_lowercase().contains(needle));
    let status_ok = match &self.status {
      StatusFilter::All => true,
      StatusFilter::Only(status) => *status == candidate.status,
    };
    search_ok && status_ok && self.contribution.accepts(candidate.profile.contributor)
  }
}
