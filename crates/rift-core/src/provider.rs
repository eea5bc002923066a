//! Capability traits for the two external providers.
//!
//! Implemented by `rift-providers` for production and by scripted stubs in
//! tests. Prompt construction and transport stay behind these seams; the
//! reconciliation loop only sees candidates and judgments.

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  record::{CandidateRecord, ConflictRecord, ConflictType},
  subject::Subject,
};

/// Days covered by a subject's first fetch, when it has no checkpoint yet.
pub const FIRST_RUN_LOOKBACK_DAYS: u32 = 90;

// ─── Retrieval ───────────────────────────────────────────────────────────────

/// The time constraint a retrieval provider must honour. The pipeline does not
/// re-filter returned candidates by date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchWindow {
  /// Events since the subject's last checkpoint.
  Since(NaiveDate),
  /// Events in the trailing `days` days.
  Lookback { days: u32 },
}

impl FetchWindow {
  pub fn for_checkpoint(checkpoint: Option<NaiveDate>) -> Self {
    match checkpoint {
      Some(date) => Self::Since(date),
      None => Self::Lookback {
        days: FIRST_RUN_LOOKBACK_DAYS,
      },
    }
  }
}

/// Source of candidate events for a subject.
pub trait CandidateProvider: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return candidate events for `subject` within `window`, in the provider's
  /// preferred order. Subject fields on the returned records may be left
  /// empty; the caller stamps them.
  fn fetch<'a>(
    &'a self,
    subject: &'a Subject,
    window: FetchWindow,
  ) -> impl Future<Output = Result<Vec<CandidateRecord>, Self::Error>> + Send + 'a;
}

// ─── Verification ────────────────────────────────────────────────────────────

/// A verification provider's structured answer about one candidate.
///
/// The default judgment is "new and credible", matching a verifier reply that
/// leaves `is_credible` out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Judgment {
  /// Same event as an existing record, reworded.
  pub is_duplicate:     bool,
  pub reason:           Option<String>,
  pub is_credible:      bool,
  pub credibility_note: Option<String>,
  pub recommended_type: Option<ConflictType>,
  pub suggested_id:     Option<String>,
  pub validated_name:   Option<String>,
}

impl Default for Judgment {
  fn default() -> Self {
    Self {
      is_duplicate:     false,
      reason:           None,
      is_credible:      true,
      credibility_note: None,
      recommended_type: None,
      suggested_id:     None,
      validated_name:   None,
    }
  }
}

/// Judge of duplicate status, credibility and classification.
pub trait JudgeProvider: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Judge `candidate` against `existing`, which only ever holds records for
  /// the candidate's own subject.
  fn judge<'a>(
    &'a self,
    candidate: &'a CandidateRecord,
    existing: &'a [&'a ConflictRecord],
  ) -> impl Future<Output = Result<Judgment, Self::Error>> + Send + 'a;
}
