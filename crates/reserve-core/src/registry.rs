//! [`Registry`]: the in-memory candidate collection and its mutations.
//!
//! The registry owns the collection. Every successful mutation is followed
//! by exactly one [`store::save`] of the whole collection; a failed save is
//! handed back as a [`PersistWarning`] instead of being dropped.

use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use tracing::debug;

use crate::{
  PersistWarning, Result,
  candidate::{Candidate, CandidateId, CandidatePatch, Profile, Status},
  store::{self, EntryStore},
};

/// Summary counters shown above the candidate list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
  pub total:        usize,
  /// Candidates paying the annual contribution.
  #[serde(rename = "cotisants")]
  pub contributors: usize,
  /// Candidates whose status is [`Status::Connected`].
  #[serde(rename = "connectes")]
  pub connected:    usize,
}

/// The result of a mutation together with the outcome of persisting it.
#[derive(Debug)]
#[must_use]
pub struct Mutation<T> {
  pub value:   T,
  pub warning: Option<PersistWarning>,
}

impl<T> Mutation<T> {
  fn unsaved(value: T) -> Self { Self { value, warning: None } }
}

pub struct Registry<S> {
  store:      S,
  key:        String,
  candidates: Vec<Candidate>,
}

impl<S: EntryStore> Registry<S> {
  /// Load the collection stored under `key`. Never fails; see [`store::load`].
  pub async fn open(store: S, key: impl Into<String>) -> Self {
    let key = key.into();
    let candidates = store::load(&store, &key).await;
    Self { store, key, candidates }
  }

  pub fn key(&self) -> &str { &self.key }

  pub fn store(&self) -> &S { &self.store }

  /// All candidates in creation order.
  pub fn candidates(&self) -> &[Candidate] { &self.candidates }

  pub fn get(&self, id: CandidateId) -> Option<&Candidate> {
    self.candidates.iter().find(|c| c.id == id)
  }

  /// Register a new candidate from a submitted profile.
  ///
  /// Fails with [`crate::Error::IbanRequired`] when the profile contributes
  /// without an IBAN; nothing is stored in that case.
  pub async fn create(&mut self, profile: Profile) -> Result<Mutation<Candidate>> {
    profile.validate()?;

    // Stored timestamps carry milliseconds only; keep memory in step.
    let now = Utc::now().trunc_subsecs(3);
    let candidate = Candidate::register(self.next_id(now), profile, now);
    debug!(id = %candidate.id, "registering candidate");
    self.candidates.push(candidate.clone());

    let warning = self.persist().await;
    Ok(Mutation { value: candidate, warning })
  }

  /// Merge `patch` into the candidate with `id`. Returns `false`, without
  /// saving, when there is no such candidate.
  pub async fn update(&mut self, id: CandidateId, patch: CandidatePatch) -> Mutation<bool> {
    let Some(candidate) = self.candidates.iter_mut().find(|c| c.id == id) else {
      debug!(%id, "update of unknown candidate ignored");
      return Mutation::unsaved(false);
    };
    patch.apply(candidate);
    debug!(%id, "updated candidate");

    let warning = self.persist().await;
    Mutation { value: true, warning }
  }

  /// Remove the candidate with `id`. Returns `false`, without saving, when
  /// there is no such candidate. Asking the user for confirmation is the
  /// caller's job.
  pub async fn delete(&mut self, id: CandidateId) -> Mutation<bool> {
    let before = self.candidates.len();
    self.candidates.retain(|c| c.id != id);
    if self.candidates.len() == before {
      debug!(%id, "delete of unknown candidate ignored");
      return Mutation::unsaved(false);
    }
    debug!(%id, "deleted candidate");

    let warning = self.persist().await;
    Mutation { value: true, warning }
  }

  pub fn stats(&self) -> Stats {
    Stats {
      total:        self.candidates.len(),
      contributors: self.candidates.iter().filter(|c| c.profile.contributor).count(),
      connected:    self
        .candidates
        .iter()
        .filter(|c| c.status == Status::Connected)
        .count(),
    }
  }

  /// Milliseconds since the epoch, bumped past the largest id in use so ids
  /// stay unique when the clock stalls or goes backwards.
  fn next_id(&self, now: DateTime<Utc>) -> CandidateId {
    let floor = self
      .candidates
      .iter()
      .map(|c| c.id.0)
      .max()
      .map_or(i64::MIN, |max| max.saturating_add(1));
    CandidateId(now.timestamp_millis().max(floor))
  }

  async fn persist(&self) -> Option<PersistWarning> {
    store::save(&self.store, &self.key, &self.candidates).await.err()
  }
}
