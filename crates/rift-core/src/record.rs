//! Conflict records — the unit of the corpus — and the transient candidates
//! they are built from.
//!
//! Records are append-only: once a record is in the corpus, no field is ever
//! rewritten by the pipeline.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ─── Classification ──────────────────────────────────────────────────────────

/// The closed set of classification codes a record may carry.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ConflictType {
  /// Large-scale combat operations, invasions, long-term occupations.
  Type1,
  /// Short-term or limited force: airstrikes, missile strikes, raids.
  #[default]
  Type2,
  /// Funding, arming or training local forces; covert operations.
  Type3,
  /// Coups, sanctions, election interference, economic warfare.
  Type4,
}

impl ConflictType {
  pub const ALL: [ConflictType; 4] =
    [Self::Type1, Self::Type2, Self::Type3, Self::Type4];

  /// The code stored in the `type` field of the corpus.
  pub fn code(self) -> &'static str {
    match self {
      Self::Type1 => "type1",
      Self::Type2 => "type2",
      Self::Type3 => "type3",
      Self::Type4 => "type4",
    }
  }

  /// Human-readable label for reports and prompts.
  pub fn label(self) -> &'static str {
    match self {
      Self::Type1 => "Direct War & Occupation",
      Self::Type2 => "Direct Military Intervention",
      Self::Type3 => "Proxy War & Armed Support",
      Self::Type4 => "Political Destabilization",
    }
  }

  /// Lenient lookup used for provider output; tolerates case and padding.
  pub fn from_code(code: &str) -> Option<Self> {
    let code = code.trim();
    Self::ALL
      .into_iter()
      .find(|t| t.code().eq_ignore_ascii_case(code))
  }
}

impl fmt::Display for ConflictType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.code())
  }
}

// ─── ConflictRecord ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Casualties {
  pub us:    u64,
  pub total: u64,
}

/// A validated, persisted record of one action against one or more subjects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictRecord {
  /// Kebab-case slug, unique within the corpus.
  pub id:          String,
  pub name:        String,
  #[serde(rename = "type")]
  pub kind:        ConflictType,
  /// Subject codes this record applies to; never empty.
  pub countries:   Vec<String>,
  pub start_date:  NaiveDate,
  /// `None` means ongoing. Records produced by the verifier always carry one.
  pub end_date:    Option<NaiveDate>,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub casualties:  Casualties,
  #[serde(default)]
  pub outcome:     String,
  #[serde(default)]
  pub wiki_link:   String,
  /// Keys this crate does not model; carried through rewrites untouched.
  #[serde(flatten, skip_serializing_if = "serde_json::Map::is_empty")]
  pub extra:       serde_json::Map<String, serde_json::Value>,
}

impl ConflictRecord {
  /// Whether this record applies to the subject with `code`.
  pub fn covers(&self, code: &str) -> bool {
    self.countries.iter().any(|c| c == code)
  }
}

// ─── CandidateRecord ─────────────────────────────────────────────────────────

/// An unverified event freshly returned by the retrieval provider, keyed to
/// exactly one subject. Never persisted as-is.
///
/// Serialises with the provider's own field names so it can be quoted back to
/// the verification provider verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CandidateRecord {
  #[serde(rename = "country_code")]
  pub subject_code:     String,
  #[serde(rename = "country_name")]
  pub subject_name:     String,
  pub name:             String,
  #[serde(rename = "startDate")]
  pub start_date:       Option<NaiveDate>,
  #[serde(rename = "endDate")]
  pub end_date:         Option<NaiveDate>,
  pub description:      String,
  #[serde(rename = "type")]
  pub kind:             Option<ConflictType>,
  pub casualties_us:    u64,
  pub casualties_total: u64,
  pub outcome:          Option<String>,
  pub source_url:       String,
}

// ─── Identifiers ─────────────────────────────────────────────────────────────

/// Reduce `text` to a kebab-case slug: lowercase ASCII alphanumerics separated
/// by single hyphens. Returns an empty string if nothing survives.
pub fn slugify(text: &str) -> String {
  let mut slug = String::with_capacity(text.len());
  let mut pending_hyphen = false;

  for c in text.chars() {
    if c.is_ascii_alphanumeric() {
      if pending_hyphen && !slug.is_empty() {
        slug.push('-');
      }
      pending_hyphen = false;
      slug.push(c.to_ascii_lowercase());
    } else {
      pending_hyphen = true;
    }
  }

  slug
}

/// Return `base`, or the first of `base-2`, `base-3`, … not already used by a
/// record in `corpus`.
pub fn unique_id(base: &str, corpus: &[ConflictRecord]) -> String {
  let taken = |id: &str| corpus.iter().any(|r| r.id == id);
  if !taken(base) {
    return base.to_owned();
  }
  (2..)
    .map(|n| format!("{base}-{n}"))
    .find(|id| !taken(id))
    .unwrap_or_else(|| base.to_owned())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn slugify_collapses_punctuation() {
    assert_eq!(slugify("Operation  Southern Spear (2025)"), "operation-southern-spear-2025");
    assert_eq!(slugify("--Strikes on Sana'a--"), "strikes-on-sana-a");
    assert_eq!(slugify("¡!"), "");
  }

  #[test]
  fn unique_id_appends_counter() {
    let mut record: ConflictRecord = serde_json::from_value(serde_json::json!({
      "id": "venezuela-strikes",
      "name": "Strikes",
      "type": "type2",
      "countries": ["VE"],
      "startDate": "2025-09-02",
      "endDate": null
    }))
    .unwrap();
    let corpus = vec![record.clone()];
    assert_eq!(unique_id("venezuela-strikes", &corpus), "venezuela-strikes-2");

    record.id = "venezuela-strikes-2".into();
    let corpus = vec![corpus[0].clone(), record];
    assert_eq!(unique_id("venezuela-strikes", &corpus), "venezuela-strikes-3");
    assert_eq!(unique_id("fresh", &corpus), "fresh");
  }

  #[test]
  fn conflict_type_codes() {
    assert_eq!(ConflictType::from_code(" TYPE3 "), Some(ConflictType::Type3));
    assert_eq!(ConflictType::from_code("type9"), None);
    assert_eq!(ConflictType::Type4.label(), "Political Destabilization");
  }

  #[test]
  fn record_preserves_unknown_keys() {
    let raw = serde_json::json!({
      "id": "iran-1953",
      "name": "1953 Iranian coup d'état",
      "type": "type4",
      "countries": ["IR"],
      "startDate": "1953-08-15",
      "endDate": "1953-08-19",
      "description": "Operation Ajax.",
      "casualties": { "us": 0, "total": 300 },
      "outcome": "Mosaddegh overthrown",
      "wikiLink": "https://en.wikipedia.org/wiki/1953_Iranian_coup_d%27%C3%A9tat",
      "featured": true
    });
    let record: ConflictRecord = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(record.kind, ConflictType::Type4);
    assert_eq!(record.casualties.total, 300);
    assert!(record.covers("IR"));
    assert!(!record.covers("IQ"));
    assert_eq!(serde_json::to_value(&record).unwrap(), raw);
  }
}
