//! Subjects — the tracked countries — and the static code table.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Every subject code the updater recognises, with its display name.
pub const COUNTRIES: &[(&str, &str)] = &[
  ("AF", "Afghanistan"),
  ("AL", "Albania"),
  ("DZ", "Algeria"),
  ("AT", "Austria"),
  ("BA", "Bosnia and Herzegovina"),
  ("BE", "Belgium"),
  ("CL", "Chile"),
  ("CU", "Cuba"),
  ("DE", "Germany"),
  ("DO", "Dominican Republic"),
  ("EG", "Egypt"),
  ("FR", "France"),
  ("GB", "United Kingdom"),
  ("GD", "Grenada"),
  ("GR", "Greece"),
  ("GT", "Guatemala"),
  ("HR", "Croatia"),
  ("HN", "Honduras"),
  ("HT", "Haiti"),
  ("ID", "Indonesia"),
  ("IL", "Israel"),
  ("IQ", "Iraq"),
  ("IR", "Iran"),
  ("IT", "Italy"),
  ("JP", "Japan"),
  ("KH", "Cambodia"),
  ("KP", "North Korea"),
  ("KR", "South Korea"),
  ("KW", "Kuwait"),
  ("LA", "Laos"),
  ("LB", "Lebanon"),
  ("LY", "Libya"),
  ("MA", "Morocco"),
  ("MX", "Mexico"),
  ("NI", "Nicaragua"),
  ("NL", "Netherlands"),
  ("PA", "Panama"),
  ("PH", "Philippines"),
  ("PK", "Pakistan"),
  ("PL", "Poland"),
  ("PS", "Palestine"),
  ("RS", "Serbia"),
  ("RU", "Russia"),
  ("SD", "Sudan"),
  ("SO", "Somalia"),
  ("SV", "El Salvador"),
  ("SY", "Syria"),
  ("TL", "East Timor"),
  ("TN", "Tunisia"),
  ("UA", "Ukraine"),
  ("VE", "Venezuela"),
  ("VN", "Vietnam"),
  ("XK", "Kosovo"),
  ("YE", "Yemen"),
];

/// Display name for a recognised subject code.
pub fn country_name(code: &str) -> Option<&'static str> {
  COUNTRIES
    .iter()
    .find(|(c, _)| *c == code)
    .map(|(_, name)| *name)
}

/// A tracked country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
  pub code: String,
  pub name: String,
}

impl Subject {
  pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      code: code.into(),
      name: name.into(),
    }
  }

  /// Resolve a recognised code; anything else is [`Error::UnknownSubject`].
  pub fn from_code(code: &str) -> Result<Self> {
    country_name(code)
      .map(|name| Self::new(code, name))
      .ok_or_else(|| Error::UnknownSubject(code.to_owned()))
  }
}
