//! The `EntryStore` trait and the candidate collection's load/save contract.
//!
//! Storage is a flat key/value space of strings. The whole candidate
//! collection lives under one key as a JSON array; [`load`] and [`save`]
//! translate between that entry and `Vec<Candidate>`. Backends (e.g.
//! `reserve-store-sqlite`) only move strings around.

use std::{
  collections::HashMap,
  convert::Infallible,
  future::Future,
  sync::{Mutex, PoisonError},
};

use tracing::{debug, warn};

use crate::{PersistWarning, candidate::Candidate};

/// Storage key used when none is configured.
pub const DEFAULT_KEY: &str = "scp329-profiles";

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a durable key/value backend.
pub trait EntryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the entry stored under `key`. Returns `None` if there is none.
  fn read_entry<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Replace the entry stored under `key` with `value`.
  fn write_entry<'a>(
    &'a self,
    key: &'a str,
    value: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── Load / save ─────────────────────────────────────────────────────────────

/// Read the collection stored under `key`.
///
/// Never fails: a missing entry, an unreadable backend, or content that does
/// not deserialise all yield an empty collection.
pub async fn load<S: EntryStore>(store: &S, key: &str) -> Vec<Candidate> {
  let raw = match store.read_entry(key).await {
    Ok(Some(raw)) => raw,
    Ok(None) => {
      debug!(key, "no stored collection, starting empty");
      return Vec::new();
    }
    Err(e) => {
      warn!(key, error = %e, "could not read stored collection, starting empty");
      return Vec::new();
    }
  };

  // `null` is what an explicitly cleared entry looks like.
  match serde_json::from_str::<Option<Vec<Candidate>>>(&raw) {
    Ok(candidates) => {
      let candidates = candidates.unwrap_or_default();
      debug!(key, count = candidates.len(), "loaded collection");
      candidates
    }
    Err(e) => {
      warn!(key, error = %e, "stored collection is malformed, starting empty");
      Vec::new()
    }
  }
}

/// Serialise `records` and overwrite the entry under `key`.
pub async fn save<S: EntryStore>(
  store: &S,
  key: &str,
  records: &[Candidate],
) -> Result<(), PersistWarning> {
  let raw = serde_json::to_string(records).map_err(|e| PersistWarning::new(key, e))?;
  match store.write_entry(key, raw).await {
    Ok(()) => {
      debug!(key, count = records.len(), "saved collection");
      Ok(())
    }
    Err(e) => {
      warn!(key, error = %e, "could not save collection");
      Err(PersistWarning::new(key, e))
    }
  }
}

// ─── In-memory backend ───────────────────────────────────────────────────────

/// A process-local [`EntryStore`]; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// A store that already holds `value` under `key`.
  pub fn with_entry(key: &str, value: impl Into<String>) -> Self {
    let store = Self::new();
    store
      .entries
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .insert(key.to_owned(), value.into());
    store
  }

  /// The raw entry under `key`, as a backend would see it.
  pub fn raw(&self, key: &str) -> Option<String> {
    self
      .entries
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .get(key)
      .cloned()
  }
}

impl EntryStore for MemoryStore {
  type Error = Infallible;

  async fn read_entry(&self, key: &str) -> Result<Option<String>, Infallible> {
    Ok(self.raw(key))
  }

  async fn write_entry(&self, key: &str, value: String) -> Result<(), Infallible> {
    self
      .entries
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .insert(key.to_owned(), value);
    Ok(())
  }
}
