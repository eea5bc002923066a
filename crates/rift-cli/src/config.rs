//! Updater configuration and pre-flight checks.
//!
//! Read from a JSON or TOML file (format by extension) layered under `RIFT_*`
//! environment variables. Relative paths in the file resolve against the
//! file's own directory.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::{Context as _, Result, bail};
use rift_core::subject::Subject;
use serde::Deserialize;

const PERPLEXITY_PLACEHOLDER: &str = "YOUR_PERPLEXITY_API_KEY";
const OPENAI_PLACEHOLDER: &str = "YOUR_OPENAI_API_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct UpdaterConfig {
  #[serde(default)]
  pub perplexity_api_key:   String,
  #[serde(default)]
  pub openai_api_key:       String,
  /// Subject codes, processed in this order.
  #[serde(default)]
  pub countries:            Vec<String>,
  /// Seconds to wait between subjects.
  #[serde(default = "default_rate_limit_delay")]
  pub rate_limit_delay:     f64,
  #[serde(default = "default_corpus_path")]
  pub corpus_path:          PathBuf,
  #[serde(default = "default_state_path")]
  pub state_path:           PathBuf,
  pub perplexity_model:     Option<String>,
  pub openai_model:         Option<String>,
  #[serde(default = "default_request_timeout_secs")]
  pub request_timeout_secs: u64,
}

fn default_rate_limit_delay() -> f64 { 1.0 }

fn default_corpus_path() -> PathBuf { PathBuf::from("../data/conflicts.json") }

fn default_state_path() -> PathBuf { PathBuf::from("state.json") }

fn default_request_timeout_secs() -> u64 { 60 }

/// Load and deserialise the configuration at `path`. The file must exist.
pub fn load(path: &Path) -> Result<UpdaterConfig> {
  let settings = config::Config::builder()
    .add_source(config::File::from(path.to_path_buf()))
    .add_source(
      config::Environment::with_prefix("RIFT")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("countries"),
    )
    .build()
    .with_context(|| format!("failed to read config file {}", path.display()))?;

  let mut cfg: UpdaterConfig = settings
    .try_deserialize()
    .context("failed to deserialise UpdaterConfig")?;

  let base = path.parent().unwrap_or(Path::new(""));
  cfg.corpus_path = base.join(&cfg.corpus_path);
  cfg.state_path = base.join(&cfg.state_path);
  Ok(cfg)
}

impl UpdaterConfig {
  /// Reject missing or placeholder credentials and unusable pacing.
  pub fn check(&self) -> Result<()> {
    check_key("Perplexity", &self.perplexity_api_key, PERPLEXITY_PLACEHOLDER)?;
    check_key("OpenAI", &self.openai_api_key, OPENAI_PLACEHOLDER)?;
    if Duration::try_from_secs_f64(self.rate_limit_delay).is_err() {
      bail!(
        "rate_limit_delay must be a non-negative number of seconds, got {}",
        self.rate_limit_delay
      );
    }
    Ok(())
  }

  /// Delay between subjects. Values rejected by [`UpdaterConfig::check`] map
  /// to no delay.
  pub fn pacing(&self) -> Duration {
    Duration::try_from_secs_f64(self.rate_limit_delay).unwrap_or_default()
  }

  pub fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_secs)
  }
}

fn check_key(provider: &str, key: &str, placeholder: &str) -> Result<()> {
  let key = key.trim();
  if key.is_empty() || key == placeholder {
    bail!("please set your {provider} API key in the config file");
  }
  Ok(())
}

/// The subjects to process: just `only` when given (it must be a recognised
/// code), otherwise the configured list. An empty result is an error.
///
/// Configured codes missing from the country table are kept, using the code
/// as the display name.
pub fn resolve_subjects(configured: &[String], only: Option<&str>) -> Result<Vec<Subject>> {
  if let Some(code) = only {
    let subject = Subject::from_code(code)
      .with_context(|| format!("unknown country code: {code}"))?;
    return Ok(vec![subject]);
  }

  if configured.is_empty() {
    bail!("no countries configured");
  }

  Ok(
    configured
      .iter()
      .map(|code| {
        Subject::from_code(code).unwrap_or_else(|_| {
          tracing::warn!("country code {code} is not in the country table");
          Subject::new(code.as_str(), code.as_str())
        })
      })
      .collect(),
  )
}
