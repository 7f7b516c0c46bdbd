//! Error types for `reserve-core`.

use thiserror::Error;

use crate::candidate::CandidateId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("an IBAN is required when the candidate contributes")]
  IbanRequired,

  #[error("evaluation score {0} is out of range (expected 0 to 5)")]
  ScoreOutOfRange(u8),

  #[error("unknown status: {0:?}")]
  UnknownStatus(String),

  #[error("unknown filter value: {0:?}")]
  UnknownFilter(String),

  #[error("candidate not found: {0}")]
  CandidateNotFound(CandidateId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A write to durable storage failed. The in-memory collection still holds
/// the change; only the persisted copy is behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not persist {key:?}: {message}")]
pub struct PersistWarning {
  pub key:     String,
  pub message: String,
}

impl PersistWarning {
  pub fn new(key: &str, err: impl std::fmt::Display) -> Self {
    Self { key: key.to_owned(), message: err.to_string() }
  }
}
