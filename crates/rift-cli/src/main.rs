//! `rift-update` — extends the conflict corpus with newly reported actions.
//!
//! For each configured country, asks the retrieval provider for actions since
//! the country's last checkpoint, has the verification provider reject
//! duplicates and non-credible reports, and appends the rest to the corpus.
//!
//! # Usage
//!
//! ```text
//! rift-update --config updater/config.json
//! rift-update --dry-run --country VE
//! ```

mod config;
mod report;

use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Local;
use clap::Parser;
use rift_core::run::{RunOptions, Updater};
use rift_providers::{OpenAiJudge, PerplexityClient, chat::ChatConfig};
use rift_store_json::JsonStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Update the conflict corpus from online sources")]
struct Cli {
  /// Path to the JSON or TOML configuration file.
  #[arg(short, long, default_value = "updater/config.json")]
  config: PathBuf,

  /// Preview changes without writing the corpus, backups or state.
  #[arg(long)]
  dry_run: bool,

  /// Process only this country code.
  #[arg(long, value_name = "CODE")]
  country: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Pre-flight: nothing below may reach a provider until all of it passes.
  let cfg = config::load(&cli.config)?;
  cfg.check()?;
  let subjects = config::resolve_subjects(&cfg.countries, cli.country.as_deref())?;

  let store = JsonStore::open(cfg.corpus_path.clone(), cfg.state_path.clone())
    .await
    .with_context(|| format!("failed to open corpus at {:?}", cfg.corpus_path))?;

  let mut retrieval = ChatConfig::perplexity(cfg.perplexity_api_key.trim())
    .with_timeout(cfg.request_timeout());
  if let Some(model) = &cfg.perplexity_model {
    retrieval = retrieval.with_model(model);
  }
  let mut verification = ChatConfig::openai(cfg.openai_api_key.trim())
    .with_timeout(cfg.request_timeout());
  if let Some(model) = &cfg.openai_model {
    verification = verification.with_model(model);
  }

  let candidates = PerplexityClient::new(retrieval).context("failed to build retrieval client")?;
  let judge = OpenAiJudge::new(verification).context("failed to build verification client")?;

  tracing::info!("processing {} countries", subjects.len());
  let updater = Updater::new(candidates, judge, store, RunOptions {
    preview: cli.dry_run,
    pacing:  cfg.pacing(),
    today:   Local::now().date_naive(),
  });

  let summary = updater.run(&subjects).await.context("update run failed")?;
  print!("{}", report::render(&summary));

  Ok(())
}
