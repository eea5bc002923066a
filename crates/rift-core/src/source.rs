//! Candidate source: subject + checkpoint in, stamped candidates out.

use chrono::NaiveDate;

use crate::{
  provider::{CandidateProvider, FetchWindow},
  record::CandidateRecord,
  subject::Subject,
};

/// Fetch candidates for `subject` since `checkpoint` (or over the first-run
/// lookback window) and stamp each with the subject's code and name.
///
/// A provider failure is logged and yields no candidates, so one bad subject
/// never stops the run.
pub async fn fetch_candidates<P: CandidateProvider>(
  provider: &P,
  subject: &Subject,
  checkpoint: Option<NaiveDate>,
) -> Vec<CandidateRecord> {
  let window = FetchWindow::for_checkpoint(checkpoint);

  match provider.fetch(subject, window).await {
    Ok(mut candidates) => {
      for candidate in &mut candidates {
        candidate.subject_code.clone_from(&subject.code);
        candidate.subject_name.clone_from(&subject.name);
      }
      candidates
    }
    Err(e) => {
      tracing::warn!(subject = %subject.code, error = %e, "candidate fetch failed");
      Vec::new()
    }
  }
}
