//! End-to-end runs of the updater against a real `JsonStore`.

use std::{path::Path, time::Duration};

use chrono::NaiveDate;
use rift_core::{
  provider::{CandidateProvider, FetchWindow, JudgeProvider, Judgment},
  record::{CandidateRecord, ConflictRecord},
  run::{CommitOutcome, RunOptions, Updater},
  subject::Subject,
};
use rift_store_json::JsonStore;
use tempfile::TempDir;

const CORPUS: &str = r#"[
    {
        "id": "iran-2024-strikes",
        "name": "Strikes on IRGC-linked sites",
        "type": "type2",
        "countries": ["IR"],
        "startDate": "2024-01-01",
        "endDate": "2024-02-01",
        "description": "Retaliatory strikes.",
        "casualties": { "us": 0, "total": 40 },
        "outcome": "Concluded",
        "wikiLink": ""
    }
]"#;

#[derive(Debug, thiserror::Error)]
#[error("stub failure")]
struct StubError;

/// Every subject yields the same fixed candidates.
struct Fixed(Vec<CandidateRecord>);

impl CandidateProvider for Fixed {
  type Error = StubError;

  async fn fetch(
    &self,
    _subject: &Subject,
    _window: FetchWindow,
  ) -> Result<Vec<CandidateRecord>, StubError> {
    Ok(self.0.clone())
  }
}

/// Duplicate when an existing record for the subject starts the same day.
struct SameStartDay;

impl JudgeProvider for SameStartDay {
  type Error = StubError;

  async fn judge(
    &self,
    candidate: &CandidateRecord,
    existing: &[&ConflictRecord],
  ) -> Result<Judgment, StubError> {
    let is_duplicate = existing
      .iter()
      .any(|r| Some(r.start_date) == candidate.start_date);
    Ok(Judgment {
      is_duplicate,
      is_credible: true,
      ..Judgment::default()
    })
  }
}

fn today() -> NaiveDate { "2025-06-15".parse().unwrap() }

fn candidate(name: &str, start: &str) -> CandidateRecord {
  CandidateRecord {
    name: name.into(),
    start_date: Some(start.parse().unwrap()),
    description: "reported".into(),
    ..CandidateRecord::default()
  }
}

async fn setup() -> (TempDir, JsonStore) {
  let dir = tempfile::tempdir().unwrap();
  let corpus = dir.path().join("conflicts.json");
  std::fs::write(&corpus, CORPUS).unwrap();
  let store = JsonStore::open(&corpus, dir.path().join("state.json"))
    .await
    .unwrap();
  (dir, store)
}

fn file_names(dir: &Path) -> Vec<String> {
  let mut names: Vec<String> = std::fs::read_dir(dir)
    .unwrap()
    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
    .collect();
  names.sort();
  names
}

fn options(preview: bool) -> RunOptions {
  RunOptions {
    preview,
    pacing: Duration::ZERO,
    today: today(),
  }
}

#[tokio::test]
async fn reworded_duplicate_leaves_corpus_untouched() {
  let (dir, store) = setup().await;
  let updater = Updater::new(
    Fixed(vec![candidate("US strikes Iranian proxies in January", "2024-01-01")]),
    SameStartDay,
    store,
    options(false),
  );

  let summary = updater.run(&[Subject::from_code("IR").unwrap()]).await.unwrap();

  assert!(summary.accepted.is_empty());
  assert_eq!(summary.commit, CommitOutcome::CheckpointsOnly);
  assert_eq!(std::fs::read_to_string(dir.path().join("conflicts.json")).unwrap(), CORPUS);
  assert_eq!(
    std::fs::read_to_string(dir.path().join("state.json")).unwrap(),
    "{\n    \"IR\": \"2025-06-15\"\n}"
  );
  assert_eq!(file_names(dir.path()), vec!["conflicts.json", "state.json"]);
}

#[tokio::test]
async fn preview_has_no_durable_effects() {
  let (dir, store) = setup().await;
  let updater = Updater::new(
    Fixed(vec![
      candidate("Boat strike", "2025-09-02"),
      candidate("Second boat strike", "2025-09-15"),
    ]),
    SameStartDay,
    store,
    options(true),
  );

  let subjects = [
    Subject::from_code("VE").unwrap(),
    Subject::from_code("CU").unwrap(),
  ];
  let summary = updater.run(&subjects).await.unwrap();

  assert_eq!(summary.accepted.len(), 4);
  assert_eq!(summary.commit, CommitOutcome::Preview);
  assert_eq!(std::fs::read_to_string(dir.path().join("conflicts.json")).unwrap(), CORPUS);
  assert_eq!(file_names(dir.path()), vec!["conflicts.json"]);
}

#[tokio::test]
async fn commit_backs_up_prior_corpus_before_rewrite() {
  let (dir, store) = setup().await;
  let updater = Updater::new(
    Fixed(vec![candidate("Boat strike", "2025-09-02")]),
    SameStartDay,
    store,
    options(false),
  );

  let summary = updater.run(&[Subject::from_code("VE").unwrap()]).await.unwrap();

  let CommitOutcome::Committed { backup } = summary.commit else {
    panic!("expected a commit");
  };
  assert_eq!(std::fs::read_to_string(&backup).unwrap(), CORPUS);

  let written: Vec<ConflictRecord> = serde_json::from_str(
    &std::fs::read_to_string(dir.path().join("conflicts.json")).unwrap(),
  )
  .unwrap();
  assert_eq!(written.len(), 2);
  assert_eq!(written[0].id, "iran-2024-strikes");
  assert_eq!(written[1].id, "boat-strike");
  assert_eq!(written[1].countries, vec!["VE"]);
  assert_eq!(written[1].end_date, Some(today()));
  assert_eq!(file_names(dir.path()).len(), 3);
}
