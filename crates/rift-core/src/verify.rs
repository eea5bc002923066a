//! Record verifier: one candidate plus the subject's slice of the corpus in,
//! a [`Verdict`] out.

use chrono::NaiveDate;

use crate::{
  provider::{JudgeProvider, Judgment},
  record::{
    CandidateRecord, Casualties, ConflictRecord, ConflictType, slugify, unique_id,
  },
};

/// Outcome applied when a candidate omits it.
const DEFAULT_OUTCOME: &str = "Ongoing";
/// Identifier used when neither the verifier nor the name yields a slug.
const FALLBACK_ID: &str = "unknown";

/// The result of verifying one candidate.
#[derive(Debug)]
pub enum Verdict {
  /// Genuinely new and credible; ready to append to the corpus.
  Accepted(ConflictRecord),
  RejectedDuplicate { reason: Option<String> },
  RejectedNotCredible { note: Option<String> },
  /// The provider could not produce a judgment. Discarded like a duplicate.
  Failed(Box<dyn std::error::Error + Send + Sync>),
}

/// Verify `candidate` against the records in `corpus` that cover its subject.
///
/// Records for other subjects are never shown to the provider. `today` fills
/// any missing start or end date on the resulting record.
pub async fn verify<J: JudgeProvider>(
  judge: &J,
  candidate: &CandidateRecord,
  corpus: &[ConflictRecord],
  today: NaiveDate,
) -> Verdict {
  let existing: Vec<&ConflictRecord> = corpus
    .iter()
    .filter(|r| r.covers(&candidate.subject_code))
    .collect();

  match judge.judge(candidate, &existing).await {
    Ok(judgment) => judgment_to_verdict(judgment, candidate, corpus, today),
    Err(e) => Verdict::Failed(Box::new(e)),
  }
}

/// Apply a judgment: reject duplicates first, then non-credible sources,
/// otherwise build the normalised record.
pub fn judgment_to_verdict(
  judgment: Judgment,
  candidate: &CandidateRecord,
  corpus: &[ConflictRecord],
  today: NaiveDate,
) -> Verdict {
  if judgment.is_duplicate {
    return Verdict::RejectedDuplicate {
      reason: judgment.reason,
    };
  }
  if !judgment.is_credible {
    return Verdict::RejectedNotCredible {
      note: judgment.credibility_note,
    };
  }

  let base_id = judgment
    .suggested_id
    .as_deref()
    .map(slugify)
    .filter(|s| !s.is_empty())
    .or_else(|| Some(slugify(&candidate.name)).filter(|s| !s.is_empty()))
    .unwrap_or_else(|| FALLBACK_ID.to_owned());

  let name = judgment
    .validated_name
    .filter(|n| !n.trim().is_empty())
    .unwrap_or_else(|| candidate.name.clone());

  let record = ConflictRecord {
    id: unique_id(&base_id, corpus),
    name,
    kind: judgment
      .recommended_type
      .or(candidate.kind)
      .unwrap_or(ConflictType::default()),
    countries: vec![candidate.subject_code.clone()],
    start_date: candidate.start_date.unwrap_or(today),
    end_date: Some(candidate.end_date.unwrap_or(today)),
    description: candidate.description.clone(),
    casualties: Casualties {
      us:    candidate.casualties_us,
      total: candidate.casualties_total,
    },
    outcome: candidate
      .outcome
      .clone()
      .unwrap_or_else(|| DEFAULT_OUTCOME.to_owned()),
    wiki_link: candidate.source_url.clone(),
    extra: serde_json::Map::new(),
  };

  Verdict::Accepted(record)
}
