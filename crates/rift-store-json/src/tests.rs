//! Tests for `JsonStore` against a temporary directory.

use std::path::Path;

use chrono::NaiveDate;
use rift_core::{checkpoint::Checkpoints, record::ConflictRecord, store::CorpusStore};
use tempfile::TempDir;

use crate::{Error, JsonStore, encode::backup_path};

const CORPUS: &str = r#"[
    {
        "id": "cuba-embargo",
        "name": "Embargo against Cuba",
        "type": "type4",
        "countries": ["CU"],
        "startDate": "1962-02-07",
        "endDate": null,
        "description": "Economic, commercial and financial embargo.",
        "casualties": { "us": 0, "total": 0 },
        "outcome": "Ongoing",
        "wikiLink": "https://en.wikipedia.org/wiki/United_States_embargo_against_Cuba"
    },
    {
        "id": "iran-1953",
        "name": "1953 Iranian coup d'état",
        "type": "type4",
        "countries": ["IR"],
        "startDate": "1953-08-15",
        "endDate": "1953-08-19",
        "description": "Operation Ajax — Mosaddegh overthrown.",
        "casualties": { "us": 0, "total": 300 },
        "outcome": "Shah restored",
        "wikiLink": "",
        "featured": true
    }
]"#;

fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

async fn fixture() -> (TempDir, JsonStore) {
  let dir = tempfile::tempdir().expect("tempdir");
  let corpus = dir.path().join("conflicts.json");
  std::fs::write(&corpus, CORPUS).unwrap();
  let store = JsonStore::open(&corpus, dir.path().join("state").join("state.json"))
    .await
    .expect("open store");
  (dir, store)
}

fn backups(dir: &Path) -> Vec<String> {
  let mut names: Vec<String> = std::fs::read_dir(dir)
    .unwrap()
    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
    .filter(|n| n.starts_with("conflicts_"))
    .collect();
  names.sort();
  names
}

// ─── Opening and loading ─────────────────────────────────────────────────────

#[tokio::test]
async fn open_requires_corpus() {
  let dir = tempfile::tempdir().unwrap();
  let result = JsonStore::open(dir.path().join("missing.json"), dir.path().join("s.json")).await;
  assert!(matches!(result, Err(Error::CorpusMissing(_))));
}

#[tokio::test]
async fn load_corpus_reads_records_in_order() {
  let (_dir, store) = fixture().await;
  let corpus = store.load_corpus().await.unwrap();
  assert_eq!(corpus.len(), 2);
  assert_eq!(corpus[0].id, "cuba-embargo");
  assert_eq!(corpus[0].end_date, None);
  assert_eq!(corpus[1].end_date, Some(date("1953-08-19")));
  assert_eq!(corpus[1].extra.get("featured"), Some(&serde_json::json!(true)));
}

#[tokio::test]
async fn load_corpus_rejects_malformed_json() {
  let (_dir, store) = fixture().await;
  std::fs::write(store.corpus_path(), "[{").unwrap();
  assert!(matches!(store.load_corpus().await, Err(Error::Json { .. })));
}

#[tokio::test]
async fn absent_checkpoint_file_is_empty() {
  let (_dir, store) = fixture().await;
  assert!(store.load_checkpoints().await.unwrap().is_empty());
}

// ─── Writing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn checkpoints_written_as_flat_dates() {
  let (_dir, store) = fixture().await;
  let mut checkpoints = Checkpoints::new();
  checkpoints.advance("VE", date("2025-06-15"));
  checkpoints.advance("IR", date("2025-06-14"));

  store.save_checkpoints(&checkpoints).await.unwrap();

  let text = std::fs::read_to_string(store.checkpoint_path()).unwrap();
  assert_eq!(text, "{\n    \"IR\": \"2025-06-14\",\n    \"VE\": \"2025-06-15\"\n}");
  assert_eq!(store.load_checkpoints().await.unwrap(), checkpoints);
}

#[tokio::test]
async fn save_corpus_keeps_unknown_keys_and_unicode() {
  let (dir, store) = fixture().await;
  let corpus = store.load_corpus().await.unwrap();

  store.save_corpus(&corpus).await.unwrap();

  let text = std::fs::read_to_string(store.corpus_path()).unwrap();
  assert!(text.contains("coup d'état"));
  assert!(text.contains("Operation Ajax — Mosaddegh"));
  assert!(text.contains("\n        \"featured\": true"));
  assert!(text.contains("\"endDate\": null"));

  let reloaded: Vec<ConflictRecord> = serde_json::from_str(&text).unwrap();
  assert_eq!(reloaded, corpus);
  // No staging file is left behind.
  assert!(!dir.path().join("conflicts.json.tmp").exists());
}

// ─── Backups ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn backup_is_byte_identical_copy() {
  let (dir, store) = fixture().await;

  let backup = store.backup_corpus().await.unwrap();

  assert_eq!(backup.parent(), Some(dir.path()));
  assert_eq!(std::fs::read(&backup).unwrap(), CORPUS.as_bytes());
  let name = backup.file_name().unwrap().to_string_lossy().into_owned();
  // conflicts_YYYY-MM-DD_HHMMSS.json
  assert!(name.starts_with("conflicts_"));
  assert!(name.ends_with(".json"));
  assert_eq!(name.len(), "conflicts_2025-06-15_120000.json".len());
}

#[tokio::test]
async fn same_second_backups_do_not_clobber() {
  let (dir, store) = fixture().await;

  let first = store.backup_corpus().await.unwrap();
  std::fs::write(store.corpus_path(), "[]").unwrap();
  let second = store.backup_corpus().await.unwrap();

  assert_ne!(first, second);
  assert_eq!(std::fs::read(&first).unwrap(), CORPUS.as_bytes());
  assert_eq!(std::fs::read(&second).unwrap(), b"[]");
  assert_eq!(backups(dir.path()).len(), 2);
}

#[test]
fn backup_names() {
  let stamp = date("2025-06-15").and_hms_opt(9, 5, 7).unwrap();
  let path = Path::new("/data/conflicts.json");
  assert_eq!(
    backup_path(path, stamp, 0),
    Path::new("/data/conflicts_2025-06-15_090507.json")
  );
  assert_eq!(
    backup_path(path, stamp, 2),
    Path::new("/data/conflicts_2025-06-15_090507_2.json")
  );
  assert_eq!(
    backup_path(Path::new("corpus"), stamp, 0),
    Path::new("corpus_2025-06-15_090507")
  );
}
