//! Serialisation and naming helpers for the on-disk documents.
//!
//! Documents are written with four-space indentation and non-ASCII text kept
//! verbatim, matching the hand-edited corpus.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Serialise `value` as pretty-printed JSON with a four-space indent.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
  let mut buf = Vec::new();
  let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
  value.serialize(&mut ser)?;
  Ok(buf)
}

/// `<stem>_<YYYY-MM-DD_HHMMSS>[_<n>]<.ext>` beside `path`. `attempt` 0 yields
/// the plain timestamped name; later attempts disambiguate same-second backups.
pub fn backup_path(path: &Path, stamp: NaiveDateTime, attempt: u32) -> PathBuf {
  let stem = path
    .file_stem()
    .map(|s| s.to_string_lossy().into_owned())
    .unwrap_or_default();
  let ext = path
    .extension()
    .map(|e| format!(".{}", e.to_string_lossy()))
    .unwrap_or_default();
  let stamp = stamp.format("%Y-%m-%d_%H%M%S");

  let name = if attempt == 0 {
    format!("{stem}_{stamp}{ext}")
  } else {
    format!("{stem}_{stamp}_{attempt}{ext}")
  };
  path.with_file_name(name)
}

/// The temp file a rewrite of `path` is staged in.
pub fn staging_path(path: &Path) -> PathBuf {
  let name = path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_default();
  path.with_file_name(format!("{name}.tmp"))
}
