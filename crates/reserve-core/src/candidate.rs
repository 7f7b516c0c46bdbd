//! Candidate records, the only entity the reserve persists.
//!
//! The JSON field names are fixed by the stored layout (`nom`, `prenom`,
//! `statut`, `evaluationMotivation`, ...). Every field except `id` has a
//! default so that records written by older versions still load, and keys
//! this model does not know are carried through untouched.

use std::{borrow::Cow, fmt, str::FromStr};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{Error, Result};

// ─── Identifier ──────────────────────────────────────────────────────────────

/// Creation time in milliseconds since the Unix epoch. The registry keeps
/// these strictly increasing, so two candidates never share one.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CandidateId(pub i64);

impl fmt::Display for CandidateId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Display::fmt(&self.0, f) }
}

impl FromStr for CandidateId {
  type Err = std::num::ParseIntError;

  fn from_str(s: &str) -> Result<Self, Self::Err> { s.trim().parse().map(Self) }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Where a candidate stands in the relationship.
///
/// Stored as its id string. A stored id that matches none of the known
/// statuses loads as [`Status::Unknown`] and is written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
  #[default]
  New,
  Reading,
  ContactInitiated,
  Exchanging,
  Connected,
  Paused,
  Ambassador,
  LoremAlpha,
  LoremBeta,
  LoremGamma,
  Unknown(String),
}

impl Status {
  /// The known statuses, in display order.
  pub const ALL: [Status; 10] = [
    Status::New,
    Status::Reading,
    Status::ContactInitiated,
    Status::Exchanging,
    Status::Connected,
    Status::Paused,
    Status::Ambassador,
    Status::LoremAlpha,
    Status::LoremBeta,
    Status::LoremGamma,
  ];

  /// The stored id, e.g. `"contact_initie"`.
  pub fn id(&self) -> &str {
    match self {
      Self::New => "nouveau",
      Self::Reading => "en_lecture",
      Self::ContactInitiated => "contact_initie",
      Self::Exchanging => "en_echange",
      Self::Connected => "connecte",
      Self::Paused => "en_pause",
      Self::Ambassador => "ambassadeur",
      Self::LoremAlpha => "lorem_alpha",
      Self::LoremBeta => "lorem_beta",
      Self::LoremGamma => "lorem_gamma",
      Self::Unknown(raw) => raw,
    }
  }

  pub fn label(&self) -> Cow<'static, str> {
    let label = match self {
      Self::New => "Nouveau",
      Self::Reading => "En lecture",
      Self::ContactInitiated => "Contact initié",
      Self::Exchanging => "En échange",
      Self::Connected => "Connecté·e",
      Self::Paused => "En pause",
      Self::Ambassador => "Ambassadeur·rice",
      Self::LoremAlpha => "Lorem Alpha",
      Self::LoremBeta => "Lorem Beta",
      Self::LoremGamma => "Lorem Gamma",
      Self::Unknown(raw) => return Cow::Owned(format!("Inconnu ({raw})")),
    };
    Cow::Borrowed(label)
  }

  /// Look up a known status by id. Never yields [`Status::Unknown`].
  pub fn from_id(id: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|s| s.id() == id)
  }

  pub fn is_known(&self) -> bool { !matches!(self, Self::Unknown(_)) }

  /// The next known status in display order, wrapping around. An unknown
  /// status steps to the first one.
  pub fn next(&self) -> Self { self.step(1) }

  pub fn prev(&self) -> Self { self.step(Self::ALL.len() - 1) }

  fn step(&self, by: usize) -> Self {
    let len = Self::ALL.len();
    match Self::ALL.iter().position(|s| s == self) {
      Some(i) => Self::ALL[(i + by) % len].clone(),
      None => Status::New,
    }
  }
}

impl fmt::Display for Status {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.label()) }
}

/// Parses a user-supplied id; unknown ids are rejected rather than wrapped.
impl FromStr for Status {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Self::from_id(s.trim()).ok_or_else(|| Error::UnknownStatus(s.to_owned()))
  }
}

impl From<String> for Status {
  fn from(raw: String) -> Self { Self::from_id(&raw).unwrap_or(Self::Unknown(raw)) }
}

impl From<Status> for String {
  fn from(status: Status) -> Self {
    match status {
      Status::Unknown(raw) => raw,
      known => known.id().to_owned(),
    }
  }
}

// ─── Evaluation ──────────────────────────────────────────────────────────────

/// A reviewer rating between 0 and 5 inclusive.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
  pub const MAX: u8 = 5;
  pub const ZERO: Score = Score(0);

  pub fn new(value: u8) -> Result<Self> {
    if value > Self::MAX {
      return Err(Error::ScoreOutOfRange(value));
    }
    Ok(Self(value))
  }

  pub fn get(self) -> u8 { self.0 }

  pub fn incremented(self) -> Self { Self(self.0.saturating_add(1).min(Self::MAX)) }

  pub fn decremented(self) -> Self { Self(self.0.saturating_sub(1)) }
}

impl TryFrom<u8> for Score {
  type Error = Error;

  fn try_from(value: u8) -> Result<Self> { Self::new(value) }
}

impl From<Score> for u8 {
  fn from(score: Score) -> Self { score.0 }
}

impl fmt::Display for Score {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// The two independently scored attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
  Motivation,
  Curiosity,
}

impl Criterion {
  pub fn initial(self) -> char {
    match self {
      Self::Motivation => 'M',
      Self::Curiosity => 'C',
    }
  }
}

// ─── Profile ─────────────────────────────────────────────────────────────────

/// Every free-text field of a profile, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
  FirstName,
  LastName,
  Email,
  Phone,
  Location,
  LinkedIn,
  Website,
  Availability,
  Motivation,
  Curiosity,
  Skills,
  Comment,
  Iban,
}

impl ProfileField {
  pub const ALL: [ProfileField; 13] = [
    ProfileField::FirstName,
    ProfileField::LastName,
    ProfileField::Email,
    ProfileField::Phone,
    ProfileField::Location,
    ProfileField::LinkedIn,
    ProfileField::Website,
    ProfileField::Availability,
    ProfileField::Motivation,
    ProfileField::Curiosity,
    ProfileField::Skills,
    ProfileField::Comment,
    ProfileField::Iban,
  ];

  pub fn label(self) -> &'static str {
    match self {
      Self::FirstName => "Prénom",
      Self::LastName => "Nom",
      Self::Email => "Email",
      Self::Phone => "Téléphone",
      Self::Location => "Localisation",
      Self::LinkedIn => "LinkedIn",
      Self::Website => "Site",
      Self::Availability => "Disponibilité",
      Self::Motivation => "Motivation",
      Self::Curiosity => "Curiosité",
      Self::Skills => "Compétences",
      Self::Comment => "Commentaire",
      Self::Iban => "IBAN",
    }
  }

  /// Hint shown in an empty input.
  pub fn placeholder(self) -> &'static str {
    match self {
      Self::Motivation => "Qu'est-ce qui vous attire ?",
      Self::Curiosity => "Que voulez-vous découvrir ?",
      Self::Skills => "Ce que vous apportez...",
      Self::Iban => "FR76...",
      _ => "",
    }
  }
}

/// The creatable part of a candidate. A registration draft is a `Profile`
/// that has not been submitted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
  #[serde(rename = "prenom")]
  pub first_name:   String,
  #[serde(rename = "nom")]
  pub last_name:    String,
  pub email:        String,
  #[serde(rename = "telephone")]
  pub phone:        String,
  #[serde(rename = "localisation")]
  pub location:     String,
  pub linkedin:     String,
  #[serde(rename = "site")]
  pub website:      String,
  #[serde(rename = "disponibilite")]
  pub availability: String,
  pub motivation:   String,
  #[serde(rename = "curiosite")]
  pub curiosity:    String,
  #[serde(rename = "competences")]
  pub skills:       String,
  #[serde(rename = "commentaire")]
  pub comment:      String,
  /// Opted into the annual contribution; requires an IBAN at creation.
  #[serde(rename = "cotisant")]
  pub contributor:  bool,
  pub iban:         String,
}

impl Profile {
  pub fn text(&self, field: ProfileField) -> &str {
    match field {
      ProfileField::FirstName => &self.first_name,
      ProfileField::LastName => &self.last_name,
      ProfileField::Email => &self.email,
      ProfileField::Phone => &self.phone,
      ProfileField::Location => &self.location,
      ProfileField::LinkedIn => &self.linkedin,
      ProfileField::Website => &self.website,
      ProfileField::Availability => &self.availability,
      ProfileField::Motivation => &self.motivation,
      ProfileField::Curiosity => &self.curiosity,
      ProfileField::Skills => &self.skills,
      ProfileField::Comment => &self.comment,
      ProfileField::Iban => &self.iban,
    }
  }

  pub fn text_mut(&mut self, field: ProfileField) -> &mut String {
    match field {
      ProfileField::FirstName => &mut self.first_name,
      ProfileField::LastName => &mut self.last_name,
      ProfileField::Email => &mut self.email,
      ProfileField::Phone => &mut self.phone,
      ProfileField::Location => &mut self.location,
      ProfileField::LinkedIn => &mut self.linkedin,
      ProfileField::Website => &mut self.website,
      ProfileField::Availability => &mut self.availability,
      ProfileField::Motivation => &mut self.motivation,
      ProfileField::Curiosity => &mut self.curiosity,
      ProfileField::Skills => &mut self.skills,
      ProfileField::Comment => &mut self.comment,
      ProfileField::Iban => &mut self.iban,
    }
  }

  /// Whether this profile may be submitted: contributors need an IBAN that
  /// is not blank.
  pub fn can_submit(&self) -> bool { !self.contributor || !self.iban.trim().is_empty() }

  pub fn validate(&self) -> Result<()> {
    if self.can_submit() { Ok(()) } else { Err(Error::IbanRequired) }
  }
}

// ─── Candidate ───────────────────────────────────────────────────────────────

/// A persisted candidate record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
  pub id:               CandidateId,
  #[serde(flatten)]
  pub profile:          Profile,
  #[serde(default, rename = "statut")]
  pub status:           Status,
  #[serde(default, rename = "evaluationMotivation")]
  pub motivation_score: Score,
  #[serde(default, rename = "evaluationCuriosite")]
  pub curiosity_score:  Score,
  /// Set once at creation; absent on records that predate it. Written with
  /// millisecond precision.
  #[serde(
    default,
    rename = "dateInscription",
    serialize_with = "serialize_millis",
    skip_serializing_if = "Option::is_none"
  )]
  pub registered_at:    Option<DateTime<Utc>>,
  /// Stored keys outside this model, written back as they were read.
  #[serde(flatten)]
  pub extra:            Map<String, Value>,
}

fn serialize_millis<S: Serializer>(
  at: &Option<DateTime<Utc>>,
  serializer: S,
) -> Result<S::Ok, S::Error> {
  match at {
    Some(at) => serializer.serialize_str(&timestamp(at)),
    None => serializer.serialize_none(),
  }
}

/// `2024-03-01T09:30:00.000Z`: always three fraction digits.
fn timestamp(at: &DateTime<Utc>) -> String { at.to_rfc3339_opts(SecondsFormat::Millis, true) }

impl Candidate {
  /// A freshly registered candidate: status [`Status::New`], both scores 0.
  pub fn register(id: CandidateId, profile: Profile, at: DateTime<Utc>) -> Self {
    Self {
      id,
      profile,
      status: Status::New,
      motivation_score: Score::ZERO,
      curiosity_score: Score::ZERO,
      registered_at: Some(at),
      extra: Map::new(),
    }
  }

  pub fn score(&self, criterion: Criterion) -> Score {
    match criterion {
      Criterion::Motivation => self.motivation_score,
      Criterion::Curiosity => self.curiosity_score,
    }
  }

  /// `"<prénom> <nom>"`, with "Anonyme" standing in for a missing first name.
  pub fn display_name(&self) -> String {
    let first = self.profile.first_name.trim();
    let first = if first.is_empty() { "Anonyme" } else { first };
    format!("{first} {}", self.profile.last_name.trim()).trim_end().to_owned()
  }

  /// The string form of every field, including the non-human ones (id,
  /// flags, scores, timestamp) and any unmodelled keys. Free-text search
  /// scans all of them.
  pub fn field_strings(&self) -> Vec<Cow<'_, str>> {
    let mut out = Vec::with_capacity(ProfileField::ALL.len() + 6);
    out.push(Cow::Owned(self.id.to_string()));
    out.extend(
      ProfileField::ALL
        .iter()
        .map(|f| Cow::Borrowed(self.profile.text(*f))),
    );
    out.push(Cow::Borrowed(if self.profile.contributor { "true" } else { "false" }));
    out.push(Cow::Borrowed(self.status.id()));
    out.push(Cow::Owned(self.motivation_score.to_string()));
    out.push(Cow::Owned(self.curiosity_score.to_string()));
    if let Some(at) = self.registered_at {
      out.push(Cow::Owned(timestamp(&at)));
    }
    out.extend(self.extra.values().map(|value| match value {
      Value::String(s) => Cow::Borrowed(s.as_str()),
      other => Cow::Owned(other.to_string()),
    }));
    out
  }
}

// ─── Patch ───────────────────────────────────────────────────────────────────

/// A partial update. Absent fields leave the record untouched; `id` and
/// `registered_at` cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePatch {
  pub status:           Option<Status>,
  pub motivation_score: Option<Score>,
  pub curiosity_score:  Option<Score>,
  pub contributor:      Option<bool>,
  pub text:             Vec<(ProfileField, String)>,
}

impl CandidatePatch {
  pub fn status(status: Status) -> Self { Self { status: Some(status), ..Self::default() } }

  pub fn score(criterion: Criterion, score: Score) -> Self {
    let mut patch = Self::default();
    match criterion {
      Criterion::Motivation => patch.motivation_score = Some(score),
      Criterion::Curiosity => patch.curiosity_score = Some(score),
    }
    patch
  }

  pub fn is_empty(&self) -> bool { *self == Self::default() }

  pub fn apply(self, candidate: &mut Candidate) {
    if let Some(status) = self.status {
      candidate.status = status;
    }
    if let Some(score) = self.motivation_score {
      candidate.motivation_score = score;
    }
    if let Some(score) = self.curiosity_score {
      candidate.curiosity_score = score;
    }
    if let Some(contributor) = self.contributor {
      candidate.profile.contributor = contributor;
    }
    for (field, value) in self.text {
      *candidate.profile.text_mut(field) = value;
    }
  }
}
