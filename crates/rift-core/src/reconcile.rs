//! The reconciliation loop.
//!
//! A [`Reconciler`] owns the in-memory corpus and checkpoint map for the length
//! of a run. Subjects are processed one at a time and candidates strictly in
//! source order, so every verification sees all records accepted before it,
//! including those accepted earlier in the same run.

use chrono::NaiveDate;

use crate::{
  checkpoint::Checkpoints,
  provider::{CandidateProvider, JudgeProvider},
  record::ConflictRecord,
  source::fetch_candidates,
  subject::Subject,
  verify::{Verdict, verify},
};

/// Per-subject tallies, for progress reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubjectReport {
  pub fetched:      usize,
  pub accepted:     usize,
  pub duplicates:   usize,
  pub not_credible: usize,
  pub failed:       usize,
}

/// Everything a finished reconciliation hands back to the run controller.
#[derive(Debug, Clone)]
pub struct Reconciled {
  /// The original corpus followed by every accepted record, in order.
  pub corpus:      Vec<ConflictRecord>,
  pub checkpoints: Checkpoints,
  /// Records accepted during this run, in acceptance order.
  pub accepted:    Vec<ConflictRecord>,
}

pub struct Reconciler {
  corpus:      Vec<ConflictRecord>,
  checkpoints: Checkpoints,
  accepted:    Vec<ConflictRecord>,
  today:       NaiveDate,
}

impl Reconciler {
  pub fn new(
    corpus: Vec<ConflictRecord>,
    checkpoints: Checkpoints,
    today: NaiveDate,
  ) -> Self {
    Self {
      corpus,
      checkpoints,
      accepted: Vec::new(),
      today,
    }
  }

  pub fn corpus(&self) -> &[ConflictRecord] { &self.corpus }

  pub fn checkpoints(&self) -> &Checkpoints { &self.checkpoints }

  pub fn accepted(&self) -> &[ConflictRecord] { &self.accepted }

  /// Fetch, verify and merge candidates for one subject, then advance its
  /// checkpoint to today. The checkpoint advances even when nothing was
  /// fetched or everything was rejected.
  pub async fn reconcile_subject<C, J>(
    &mut self,
    subject: &Subject,
    candidates: &C,
    judge: &J,
  ) -> SubjectReport
  where
    C: CandidateProvider,
    J: JudgeProvider,
  {
    let checkpoint = self.checkpoints.get(&subject.code);
    match checkpoint {
      Some(date) => tracing::info!(subject = %subject.code, "last checked: {date}"),
      None => tracing::info!(
        subject = %subject.code,
        "first check (looking at last {} days)",
        crate::provider::FIRST_RUN_LOOKBACK_DAYS
      ),
    }

    let fetched = fetch_candidates(candidates, subject, checkpoint).await;
    let mut report = SubjectReport {
      fetched: fetched.len(),
      ..SubjectReport::default()
    };

    if fetched.is_empty() {
      tracing::info!(subject = %subject.code, "no new actions found");
    } else {
      tracing::info!(subject = %subject.code, "found {} potential actions", fetched.len());
    }

    for candidate in &fetched {
      tracing::info!(subject = %subject.code, "verifying: {}", candidate.name);

      match verify(judge, candidate, &self.corpus, self.today).await {
        Verdict::Accepted(record) => {
          tracing::info!(
            subject = %subject.code,
            id = %record.id,
            "NEW: {} ({})",
            record.name,
            record.kind
          );
          report.accepted += 1;
          self.accepted.push(record.clone());
          self.corpus.push(record);
        }
        Verdict::RejectedDuplicate { reason } => {
          tracing::info!(
            subject = %subject.code,
            "duplicate: {}",
            reason.as_deref().unwrap_or("no reason given")
          );
          report.duplicates += 1;
        }
        Verdict::RejectedNotCredible { note } => {
          tracing::info!(
            subject = %subject.code,
            "not credible: {}",
            note.as_deref().unwrap_or("no note")
          );
          report.not_credible += 1;
        }
        Verdict::Failed(e) => {
          tracing::warn!(
            subject = %subject.code,
            candidate = %candidate.name,
            error = %e,
            "verification failed; dropping candidate"
          );
          report.failed += 1;
        }
      }
    }

    self.checkpoints.advance(&subject.code, self.today);
    report
  }

  pub fn finish(self) -> Reconciled {
    Reconciled {
      corpus:      self.corpus,
      checkpoints: self.checkpoints,
      accepted:    self.accepted,
    }
  }
}
