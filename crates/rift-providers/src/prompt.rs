//! Prompt construction for both providers.

use chrono::NaiveDate;
use serde::Serialize;

use rift_core::{
  provider::FetchWindow,
  record::{CandidateRecord, ConflictRecord, ConflictType},
};

/// Existing descriptions are cut to this many characters in the verifier's
/// context.
pub const SUMMARY_DESCRIPTION_CHARS: usize = 200;

pub const VERIFIER_SYSTEM_PROMPT: &str = "You are an expert analyst verifying and \
  deduplicating conflict data. Always respond with valid JSON only.";

/// Human phrasing of a fetch window, e.g. `since 2025-05-01`.
pub fn window_phrase(window: FetchWindow) -> String {
  match window {
    FetchWindow::Since(date) => format!("since {date}"),
    FetchWindow::Lookback { days } => format!("in the last {days} days"),
  }
}

fn type_legend() -> String {
  ConflictType::ALL
    .iter()
    .map(|t| format!("{} ({})", t.code(), t.label()))
    .collect::<Vec<_>>()
    .join(", ")
}

pub fn retrieval_prompt(subject_name: &str, window: FetchWindow) -> String {
  format!(
    "Find any recent US military actions, interventions, sanctions, covert operations, \
or acts of aggression against {subject_name} {window}.

Include:
- Military strikes, raids, or drone attacks
- New sanctions or economic measures
- Covert operations or CIA activities
- Military support to opposition groups
- Political destabilization efforts
- Weapons deployments or military buildups targeting this country

For each action found, provide:
- name: Short descriptive name
- startDate: YYYY-MM-DD format
- endDate: YYYY-MM-DD format or null if ongoing
- description: Detailed description of the action
- type: one of {legend}
- casualties_us: US casualties count (0 if unknown)
- casualties_total: Total casualties count (0 if unknown)
- outcome: Current outcome or status
- source_url: URL to a reliable source

Always include a source URL for each action.

If no actions are found, return an empty list.",
    window = window_phrase(window),
    legend = type_legend(),
  )
}

/// The slice of an existing record shown to the verifier.
#[derive(Debug, Serialize)]
pub struct ExistingSummary<'a> {
  pub id:          &'a str,
  pub name:        &'a str,
  #[serde(rename = "startDate")]
  pub start_date:  NaiveDate,
  #[serde(rename = "endDate")]
  pub end_date:    Option<NaiveDate>,
  pub description: String,
}

impl<'a> From<&'a ConflictRecord> for ExistingSummary<'a> {
  fn from(record: &'a ConflictRecord) -> Self {
    Self {
      id:          &record.id,
      name:        &record.name,
      start_date:  record.start_date,
      end_date:    record.end_date,
      description: truncate(&record.description, SUMMARY_DESCRIPTION_CHARS),
    }
  }
}

fn truncate(text: &str, max_chars: usize) -> String {
  match text.char_indices().nth(max_chars) {
    Some((cut, _)) => format!("{}...", &text[..cut]),
    None => text.to_owned(),
  }
}

pub fn verification_prompt(
  candidate: &CandidateRecord,
  existing: &[&ConflictRecord],
) -> serde_json::Result<String> {
  let candidate_json = serde_json::to_string_pretty(candidate)?;
  let summaries: Vec<ExistingSummary<'_>> =
    existing.iter().map(|r| ExistingSummary::from(*r)).collect();
  let existing_json = serde_json::to_string_pretty(&summaries)?;

  let legend = ConflictType::ALL
    .iter()
    .map(|t| format!("- {}: {}", t.code(), t.label()))
    .collect::<Vec<_>>()
    .join("\n");

  Ok(format!(
    "Analyze if this new action is a duplicate or update of any existing conflict.

NEW ACTION:
{candidate_json}

EXISTING CONFLICTS FOR {subject}:
{existing_json}

Determine:
1. Is this new action already covered by an existing conflict? (Same event, just different wording)
2. Is this an update/continuation of an existing conflict? If so, treat it as a duplicate.
3. Is this genuinely new information that should be added as a separate entry?

Also verify the conflict type is appropriate:
{legend}

Respond with ONLY valid JSON:
{{
    \"is_duplicate\": true/false,
    \"reason\": \"explanation\",
    \"recommended_type\": \"type1|type2|type3|type4\",
    \"suggested_id\": \"kebab-case-id-for-new-entry\",
    \"validated_name\": \"Corrected or improved name if needed\",
    \"is_credible\": true/false,
    \"credibility_note\": \"Note about source credibility if concerns exist\"
}}",
    subject = candidate.subject_name,
  ))
}
