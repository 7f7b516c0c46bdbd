//! Integration tests for `SqliteStore` against in-memory and on-disk databases.

use reserve_core::{
  candidate::{CandidatePatch, Criterion, Profile, Score, Status},
  registry::Registry,
  store::{self, DEFAULT_KEY, EntryStore},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn temp_db(name: &str) -> std::path::PathBuf {
  let dir = std::env::temp_dir().join(format!(
    "reserve-store-sqlite-{}-{name}",
    std::process::id()
  ));
  let _ = std::fs::remove_dir_all(&dir);
  dir.join("nested").join("reserve.sqlite3")
}

// ─── Raw entries ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_entry_reads_none() {
  let s = store().await;
  assert_eq!(s.read_entry("absent").await.unwrap(), None);
}

#[tokio::test]
async fn write_then_read() {
  let s = store().await;
  s.write_entry("k", "[1,2]".into()).await.unwrap();
  assert_eq!(s.read_entry("k").await.unwrap().as_deref(), Some("[1,2]"));
}

#[tokio::test]
async fn write_replaces_prior_content() {
  let s = store().await;
  s.write_entry("k", "first".into()).await.unwrap();
  s.write_entry("k", "second".into()).await.unwrap();
  s.write_entry("other", "untouched".into()).await.unwrap();

  assert_eq!(s.read_entry("k").await.unwrap().as_deref(), Some("second"));
  assert_eq!(s.read_entry("other").await.unwrap().as_deref(), Some("untouched"));
}

// ─── Candidate collection ────────────────────────────────────────────────────

#[tokio::test]
async fn corrupt_collection_loads_empty() {
  let s = store().await;
  s.write_entry(DEFAULT_KEY, "[{\"id\":".into()).await.unwrap();
  assert!(store::load(&s, DEFAULT_KEY).await.is_empty());
}

#[tokio::test]
async fn collection_round_trips() {
  let s = store().await;
  let mut r = Registry::open(s.clone(), DEFAULT_KEY).await;

  let profile = Profile {
    first_name: "Alex".into(),
    email: "alex@example.org".into(),
    contributor: true,
    iban: "FR7630006000011234567890189".into(),
    ..Profile::default()
  };
  let alex = r.create(profile).await.unwrap().value;
  let _ = r.update(alex.id, CandidatePatch::status(Status::Connected)).await;
  let _ = r
    .update(alex.id, CandidatePatch::score(Criterion::Curiosity, Score::new(3).unwrap()))
    .await;

  let loaded = store::load(&s, DEFAULT_KEY).await;
  assert_eq!(loaded, r.candidates());
  assert_eq!(loaded[0].status, Status::Connected);
}

#[tokio::test]
async fn reopening_file_keeps_candidates() {
  let path = temp_db("reopen");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    let mut r = Registry::open(s, DEFAULT_KEY).await;
    let _ = r.create(Profile { first_name: "Camille".into(), ..Profile::default() })
      .await
      .unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  let r = Registry::open(s, DEFAULT_KEY).await;
  assert_eq!(r.candidates().len(), 1);
  assert_eq!(r.candidates()[0].profile.first_name, "Camille");

  let _ = std::fs::remove_dir_all(path.parent().unwrap().parent().unwrap());
}

#[tokio::test]
async fn collection_written_by_the_browser_app_loads() {
  let s = store().await;
  let raw = r#"[{"nom":"Martin","prenom":"Alex","email":"","telephone":"","localisation":"Lyon",
    "motivation":"","curiosite":"","competences":"","disponibilite":"","commentaire":"",
    "cotisant":false,"iban":"","linkedin":"","site":"","id":1709285400000,"statut":"en_lecture",
    "dateInscription":"2024-03-01T09:30:00.000Z","evaluationMotivation":2,"evaluationCuriosite":0}]"#;
  s.write_entry(DEFAULT_KEY, raw.into()).await.unwrap();

  let loaded = store::load(&s, DEFAULT_KEY).await;
  assert_eq!(loaded.len(), 1);
  assert_eq!(loaded[0].profile.location, "Lyon");
  assert_eq!(loaded[0].status, Status::Reading);
  assert_eq!(loaded[0].motivation_score.get(), 2);
}
