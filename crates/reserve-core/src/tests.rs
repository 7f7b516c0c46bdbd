//! Registry and session tests against in-memory stores.

use std::io;

use serde_json::{Value, json};

use crate::{
  Error,
  candidate::{CandidateId, CandidatePatch, Criterion, Profile, ProfileField, Score, Status},
  filter::{CandidateFilter, ContributionFilter, StatusFilter},
  registry::Registry,
  session::Session,
  state::{Action, View},
  store::{self, DEFAULT_KEY, EntryStore, MemoryStore},
};

async fn registry() -> Registry<MemoryStore> {
  Registry::open(MemoryStore::new(), DEFAULT_KEY).await
}

fn alex(contributor: bool, iban: &str) -> Profile {
  Profile {
    first_name: "Alex".into(),
    contributor,
    iban: iban.into(),
    ..Profile::default()
  }
}

fn named(first_name: &str) -> Profile {
  Profile { first_name: first_name.into(), ..Profile::default() }
}

/// A backend whose writes always fail.
struct ReadOnlyStore(MemoryStore);

impl EntryStore for ReadOnlyStore {
  type Error = io::Error;

  async fn read_entry(&self, key: &str) -> Result<Option<String>, io::Error> {
    Ok(self.0.raw(key))
  }

  async fn write_entry(&self, _key: &str, _value: String) -> Result<(), io::Error> {
    Err(io::Error::other("quota exceeded"))
  }
}

/// A backend that cannot be read but accepts writes.
struct WriteOnlyStore(MemoryStore);

impl EntryStore for WriteOnlyStore {
  type Error = io::Error;

  async fn read_entry(&self, _key: &str) -> Result<Option<String>, io::Error> {
    Err(io::Error::other("permission denied"))
  }

  async fn write_entry(&self, key: &str, value: String) -> Result<(), io::Error> {
    let _ = self.0.write_entry(key, value).await;
    Ok(())
  }
}

fn raw_collection(store: &MemoryStore) -> Vec<Value> {
  serde_json::from_str(&store.raw(DEFAULT_KEY).unwrap()).unwrap()
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn contributor_without_iban_is_rejected() {
  let mut r = registry().await;
  assert!(r.create(named("Sam")).await.unwrap().warning.is_none());

  let err = r.create(alex(true, "")).await.unwrap_err();
  assert!(matches!(err, Error::IbanRequired));
  assert_eq!(r.stats().total, 1);

  let stored = store::load(r.store(), DEFAULT_KEY).await;
  assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn contributor_with_iban_is_accepted() {
  let mut r = registry().await;
  let created = r
    .create(alex(true, "FR7630006000011234567890189"))
    .await
    .unwrap();
  assert!(created.warning.is_none());

  let c = created.value;
  assert_eq!(c.status, Status::New);
  assert_eq!(c.motivation_score, Score::ZERO);
  assert_eq!(c.curiosity_score, Score::ZERO);
  assert!(c.registered_at.is_some());
  assert_eq!(r.get(c.id), Some(&c));
}

#[tokio::test]
async fn non_contributor_needs_nothing() {
  let mut r = registry().await;
  let c = r.create(Profile::default()).await.unwrap().value;
  assert_eq!(c.display_name(), "Anonyme");
}

#[tokio::test]
async fn rapid_creation_yields_unique_increasing_ids() {
  let mut r = registry().await;
  for i in 0..50 {
    let _ = r.create(named(&format!("c{i}"))).await.unwrap();
  }
  let ids: Vec<i64> = r.candidates().iter().map(|c| c.id.0).collect();
  assert!(ids.windows(2).all(|w| w[0] < w[1]), "{ids:?}");
}

#[tokio::test]
async fn ids_stay_ahead_of_stored_future_ids() {
  let far_future = i64::MAX / 2;
  let raw = format!(r#"[{{"id":{far_future},"prenom":"Later"}}]"#);
  let mut r = Registry::open(MemoryStore::with_entry(DEFAULT_KEY, raw), DEFAULT_KEY).await;
  let c = r.create(named("Now")).await.unwrap().value;
  assert_eq!(c.id, CandidateId(far_future + 1));
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn status_update_changes_only_that_field() {
  let mut r = registry().await;
  let a = r.create(named("A")).await.unwrap().value;
  let b = r.create(named("B")).await.unwrap().value;

  let m = r.update(a.id, CandidatePatch::status(Status::Exchanging)).await;
  assert!(m.value);
  assert!(m.warning.is_none());

  let updated = r.get(a.id).unwrap();
  assert_eq!(updated.status, Status::Exchanging);
  assert_eq!(updated.profile, a.profile);
  assert_eq!(updated.motivation_score, a.motivation_score);
  assert_eq!(updated.registered_at, a.registered_at);
  assert_eq!(r.get(b.id), Some(&b));

  let stored = store::load(r.store(), DEFAULT_KEY).await;
  assert_eq!(stored[0].status, Status::Exchanging);
}

#[tokio::test]
async fn scores_update_independently() {
  let mut r = registry().await;
  let a = r.create(named("A")).await.unwrap().value;

  let four = Score::new(4).unwrap();
  let _ = r.update(a.id, CandidatePatch::score(Criterion::Curiosity, four)).await;
  let updated = r.get(a.id).unwrap();
  assert_eq!(updated.curiosity_score, four);
  assert_eq!(updated.motivation_score, Score::ZERO);
}

#[tokio::test]
async fn update_of_missing_id_is_a_no_op() {
  let store = MemoryStore::new();
  let mut r = Registry::open(store, DEFAULT_KEY).await;
  let m = r.update(CandidateId(1), CandidatePatch::status(Status::Paused)).await;
  assert!(!m.value);
  assert!(r.candidates().is_empty());
  // Nothing was written.
  assert_eq!(r.store().raw(DEFAULT_KEY), None);
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn deleted_candidate_never_reloads() {
  let mut r = registry().await;
  let a = r.create(named("A")).await.unwrap().value;
  let b = r.create(named("B")).await.unwrap().value;

  assert!(r.delete(a.id).await.value);
  let stored = store::load(r.store(), DEFAULT_KEY).await;
  assert!(stored.iter().all(|c| c.id != a.id));
  assert_eq!(stored, vec![b]);
}

#[tokio::test]
async fn deleting_missing_id_leaves_collection_unchanged() {
  let mut r = registry().await;
  let _ = r.create(named("A")).await.unwrap();
  let before = r.candidates().to_vec();

  assert!(!r.delete(CandidateId(-1)).await.value);
  assert_eq!(r.candidates(), before.as_slice());
}

// ─── Stats ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn stats_count_contributors_and_connected() {
  let mut r = registry().await;
  let a = r.create(alex(true, "FR76")).await.unwrap().value;
  let _ = r.create(named("B")).await.unwrap();
  let _ = r.update(a.id, CandidatePatch::status(Status::Connected)).await;

  let stats = r.stats();
  assert_eq!(stats.total, r.candidates().len());
  assert_eq!(stats.total, 2);
  assert_eq!(stats.contributors, 1);
  assert_eq!(stats.connected, 1);
  assert!(stats.contributors <= stats.total);

  assert_eq!(
    serde_json::to_value(stats).unwrap(),
    json!({ "total": 2, "cotisants": 1, "connectes": 1 })
  );
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_then_load_round_trips() {
  let mut r = registry().await;
  let mut p = alex(true, "FR7630006000011234567890189");
  p.motivation = "Rencontrer des gens".into();
  p.linkedin = "https://linkedin.example/alex".into();
  let a = r.create(p).await.unwrap().value;
  let _ = r.create(named("B")).await.unwrap();
  let _ = r
    .update(a.id, CandidatePatch::score(Criterion::Motivation, Score::new(5).unwrap()))
    .await;

  let store = MemoryStore::new();
  store::save(&store, "copy", r.candidates()).await.unwrap();
  assert_eq!(store::load(&store, "copy").await, r.candidates());
}

#[tokio::test]
async fn reopening_sees_previous_session() {
  let mut r = registry().await;
  let _ = r.create(named("A")).await.unwrap();
  let raw = r.store().raw(DEFAULT_KEY).unwrap();

  let reopened = Registry::open(MemoryStore::with_entry(DEFAULT_KEY, raw), DEFAULT_KEY).await;
  assert_eq!(reopened.candidates(), r.candidates());
}

#[tokio::test]
async fn failed_save_is_reported_and_memory_keeps_the_change() {
  let mut r = Registry::open(ReadOnlyStore(MemoryStore::new()), DEFAULT_KEY).await;
  let created = r.create(named("A")).await.unwrap();

  let warning = created.warning.expect("a persistence warning");
  assert_eq!(warning.key, DEFAULT_KEY);
  assert!(warning.message.contains("quota exceeded"));
  assert_eq!(r.candidates().len(), 1);
}

#[tokio::test]
async fn unreadable_backend_opens_empty_and_still_saves() {
  let store = WriteOnlyStore(MemoryStore::with_entry(DEFAULT_KEY, r#"[{"id":1}]"#));
  let mut r = Registry::open(store, DEFAULT_KEY).await;
  assert!(r.candidates().is_empty());

  let created = r.create(named("A")).await.unwrap();
  assert!(created.warning.is_none());
  let stored = store::load(&r.store().0, DEFAULT_KEY).await;
  assert_eq!(stored.len(), 1);
  assert_eq!(stored[0].profile.first_name, "A");
}

#[tokio::test]
async fn unmodelled_keys_survive_updates_to_any_record() {
  let raw = r#"[{"id":1,"prenom":"A","notesInternes":"x"},{"id":2,"prenom":"B","source":"salon"}]"#;
  let mut r = Registry::open(MemoryStore::with_entry(DEFAULT_KEY, raw), DEFAULT_KEY).await;

  let _ = r.update(CandidateId(2), CandidatePatch::status(Status::Connected)).await;

  let saved = raw_collection(r.store());
  assert_eq!(saved[0]["notesInternes"], json!("x"));
  assert_eq!(saved[1]["source"], json!("salon"));
  assert_eq!(saved[1]["statut"], json!("connecte"));
}

#[tokio::test]
async fn stored_registration_date_is_searchable() {
  let mut r = registry().await;
  let _ = r.create(named("A")).await.unwrap();
  let _ = r.create(named("B")).await.unwrap();

  let saved = raw_collection(r.store());
  let stored = saved[1]["dateInscription"].as_str().unwrap().to_owned();
  let fraction = stored.rsplit('.').next().unwrap();
  assert_eq!(fraction.len(), 4, "{stored}");

  for needle in [stored.as_str(), &stored[stored.len() - 6..]] {
    let filter = CandidateFilter { search: needle.into(), ..CandidateFilter::default() };
    let hits = filter.apply(r.candidates());
    assert!(hits.iter().any(|c| c.profile.first_name == "B"), "{needle}");
  }
}

// ─── Session ─────────────────────────────────────────────────────────────────

async fn session() -> Session<MemoryStore> { Session::new(registry().await) }

#[tokio::test]
async fn refused_submit_keeps_draft_and_collection() {
  let mut s = session().await;
  s.dispatch(Action::Navigate(View::Registration)).await.unwrap();
  s.dispatch(Action::EditDraft(ProfileField::FirstName, "Alex".into()))
    .await
    .unwrap();
  s.dispatch(Action::SetContributor(true)).await.unwrap();
  s.dispatch(Action::Submit).await.unwrap();

  assert_eq!(s.stats().total, 0);
  assert_eq!(s.state().view, View::Registration);
  assert_eq!(s.state().draft.first_name, "Alex");
}

#[tokio::test]
async fn accepted_submit_resets_draft_and_returns_to_dashboard() {
  let mut s = session().await;
  s.dispatch(Action::Navigate(View::Registration)).await.unwrap();
  s.dispatch(Action::EditDraft(ProfileField::FirstName, "Alex".into()))
    .await
    .unwrap();
  s.dispatch(Action::SetContributor(true)).await.unwrap();
  s.dispatch(Action::EditDraft(ProfileField::Iban, "FR7630006000011234567890189".into()))
    .await
    .unwrap();
  assert_eq!(s.dispatch(Action::Submit).await.unwrap(), None);

  assert_eq!(s.stats().total, 1);
  assert_eq!(s.state().view, View::Dashboard);
  assert_eq!(s.state().draft, Profile::default());
  assert_eq!(s.registry().candidates()[0].profile.first_name, "Alex");
}

#[tokio::test]
async fn delete_requires_confirmation() {
  let mut s = session().await;
  s.dispatch(Action::EditDraft(ProfileField::FirstName, "A".into()))
    .await
    .unwrap();
  s.dispatch(Action::Submit).await.unwrap();
  let id = s.registry().candidates()[0].id;

  s.dispatch(Action::ConfirmDelete).await.unwrap();
  assert_eq!(s.stats().total, 1);

  s.dispatch(Action::RequestDelete(id)).await.unwrap();
  assert_eq!(s.stats().total, 1);
  s.dispatch(Action::CancelDelete).await.unwrap();
  s.dispatch(Action::ConfirmDelete).await.unwrap();
  assert_eq!(s.stats().total, 1);

  s.dispatch(Action::RequestDelete(id)).await.unwrap();
  s.dispatch(Action::ConfirmDelete).await.unwrap();
  assert_eq!(s.stats().total, 0);
}

#[tokio::test]
async fn visible_list_follows_filters() {
  let mut s = session().await;
  for name in ["Alex", "Camille"] {
    s.dispatch(Action::EditDraft(ProfileField::FirstName, name.into()))
      .await
      .unwrap();
    s.dispatch(Action::Submit).await.unwrap();
  }
  let camille = s.registry().candidates()[1].id;
  s.dispatch(Action::SetStatus(camille, Status::Connected))
    .await
    .unwrap();
  assert_eq!(s.stats().connected, 1);

  s.dispatch(Action::SetSearch("alex".into())).await.unwrap();
  let names: Vec<_> = s.visible().iter().map(|c| c.display_name()).collect();
  assert_eq!(names, ["Alex"]);

  s.dispatch(Action::SetSearch(String::new())).await.unwrap();
  s.dispatch(Action::SetStatusFilter(StatusFilter::Only(Status::Connected)))
    .await
    .unwrap();
  assert_eq!(s.visible().len(), 1);
  assert_eq!(s.visible()[0].id, camille);

  s.dispatch(Action::SetContributionFilter(ContributionFilter::Yes))
    .await
    .unwrap();
  assert!(s.visible().is_empty());
}
