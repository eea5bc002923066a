//! End-of-run summary printed to stdout.

use std::fmt::Write as _;

use rift_core::run::{CommitOutcome, RunSummary};

const RULE: &str = "============================================================";

pub fn render(summary: &RunSummary) -> String {
  let mut out = String::new();
  // Writing to a String cannot fail.
  let _ = writeln!(out, "\n{RULE}\nSUMMARY\n{RULE}");
  let _ = writeln!(out, "Countries processed: {}", summary.subjects_processed);
  let _ = writeln!(out, "New conflicts found: {}", summary.accepted.len());

  let failures: usize = summary.reports.iter().map(|(_, r)| r.failed).sum();
  if failures > 0 {
    let _ = writeln!(out, "Verification failures (dropped): {failures}");
  }

  if !summary.accepted.is_empty() {
    let _ = writeln!(out, "\nNew entries:");
    for record in &summary.accepted {
      let country = record.countries.first().map(String::as_str).unwrap_or("?");
      let _ = writeln!(out, "  - {} ({country})", record.name);
    }
  }

  match &summary.commit {
    CommitOutcome::Preview if summary.accepted.is_empty() => {
      let _ = writeln!(out, "\nDRY RUN - no new conflicts to add");
    }
    CommitOutcome::Preview => {
      let _ = writeln!(out, "\nDRY RUN - no changes saved");
      let _ = writeln!(out, "Run without --dry-run to apply changes");
    }
    CommitOutcome::CheckpointsOnly => {
      let _ = writeln!(out, "\nState updated (no new conflicts)");
    }
    CommitOutcome::Committed { backup } => {
      let name = backup
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| backup.display().to_string());
      let _ = writeln!(out, "\nBackup created: {name}");
      let _ = writeln!(out, "Corpus and state saved");
    }
  }

  out
}
