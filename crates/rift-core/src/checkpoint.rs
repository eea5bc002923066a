//! Per-subject checkpoints: the last date through which a subject's
//! candidates have been fully reconciled.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Subject code → last completion date. Serialises as a flat JSON object of
/// `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checkpoints(BTreeMap<String, NaiveDate>);

impl Checkpoints {
  pub fn new() -> Self { Self::default() }

  pub fn get(&self, code: &str) -> Option<NaiveDate> {
    self.0.get(code).copied()
  }

  /// Move `code`'s checkpoint to `date`. A checkpoint never moves backwards;
  /// an older `date` leaves the existing value in place.
  pub fn advance(&mut self, code: &str, date: NaiveDate) {
    self
      .0
      .entry(code.to_owned())
      .and_modify(|d| *d = (*d).max(date))
      .or_insert(date);
  }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl FromIterator<(String, NaiveDate)> for Checkpoints {
  fn from_iter<I: IntoIterator<Item = (String, NaiveDate)>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

  #[test]
  fn advance_inserts_then_moves_forward() {
    let mut cp = Checkpoints::new();
    assert_eq!(cp.get("IR"), None);

    cp.advance("IR", date("2025-01-10"));
    assert_eq!(cp.get("IR"), Some(date("2025-01-10")));

    cp.advance("IR", date("2025-02-01"));
    assert_eq!(cp.get("IR"), Some(date("2025-02-01")));
  }

  #[test]
  fn advance_never_moves_backwards() {
    let mut cp = Checkpoints::new();
    cp.advance("VE", date("2025-06-01"));
    cp.advance("VE", date("2025-05-01"));
    assert_eq!(cp.get("VE"), Some(date("2025-06-01")));
  }

  #[test]
  fn serialises_as_flat_object() {
    let cp: Checkpoints = [
      ("VE".to_owned(), date("2025-06-01")),
      ("IR".to_owned(), date("2025-05-30")),
    ]
    .into_iter()
    .collect();
    let json = serde_json::to_value(&cp).unwrap();
    assert_eq!(
      json,
      serde_json::json!({ "IR": "2025-05-30", "VE": "2025-06-01" })
    );
    let back: Checkpoints = serde_json::from_value(json).unwrap();
    assert_eq!(back, cp);
  }
}
