//! [`JsonStore`] — the flat-file implementation of [`CorpusStore`].

use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Serialize, de::DeserializeOwned};

use rift_core::{checkpoint::Checkpoints, record::ConflictRecord, store::CorpusStore};

use crate::{
  Error, Result,
  encode::{backup_path, staging_path, to_pretty_json},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A corpus document plus a checkpoint document on the local filesystem.
#[derive(Debug, Clone)]
pub struct JsonStore {
  corpus_path:     PathBuf,
  checkpoint_path: PathBuf,
}

impl JsonStore {
  /// Open a store over an existing corpus file. The checkpoint file may be
  /// absent; it is created on the first commit.
  pub async fn open(
    corpus_path: impl Into<PathBuf>,
    checkpoint_path: impl Into<PathBuf>,
  ) -> Result<Self> {
    let corpus_path = corpus_path.into();
    let exists = tokio::fs::try_exists(&corpus_path)
      .await
      .map_err(|source| io_error(&corpus_path, source))?;
    if !exists {
      return Err(Error::CorpusMissing(corpus_path));
    }

    Ok(Self {
      corpus_path,
      checkpoint_path: checkpoint_path.into(),
    })
  }

  pub fn corpus_path(&self) -> &Path { &self.corpus_path }

  pub fn checkpoint_path(&self) -> &Path { &self.checkpoint_path }

  async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = tokio::fs::read(path)
      .await
      .map_err(|source| io_error(path, source))?;
    serde_json::from_slice(&bytes).map_err(|source| Error::Json {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Stage `value` in a sibling temp file, then rename it over `path`.
  async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let bytes = to_pretty_json(value).map_err(|source| Error::Json {
      path: path.to_path_buf(),
      source,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      tokio::fs::create_dir_all(parent)
        .await
        .map_err(|source| io_error(parent, source))?;
    }

    let staging = staging_path(path);
    tokio::fs::write(&staging, &bytes)
      .await
      .map_err(|source| io_error(&staging, source))?;
    tokio::fs::rename(&staging, path)
      .await
      .map_err(|source| io_error(path, source))?;
    Ok(())
  }
}

fn io_error(path: &Path, source: std::io::Error) -> Error {
  Error::Io {
    path: path.to_path_buf(),
    source,
  }
}

// ─── CorpusStore impl ────────────────────────────────────────────────────────

impl CorpusStore for JsonStore {
  type Error = Error;

  async fn load_corpus(&self) -> Result<Vec<ConflictRecord>> {
    match Self::read_json(&self.corpus_path).await {
      Err(Error::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
        Err(Error::CorpusMissing(self.corpus_path.clone()))
      }
      other => other,
    }
  }

  async fn load_checkpoints(&self) -> Result<Checkpoints> {
    let exists = tokio::fs::try_exists(&self.checkpoint_path)
      .await
      .map_err(|source| io_error(&self.checkpoint_path, source))?;
    if !exists {
      return Ok(Checkpoints::new());
    }
    Self::read_json(&self.checkpoint_path).await
  }

  async fn backup_corpus(&self) -> Result<PathBuf> {
    let stamp = Local::now().naive_local();

    let mut attempt = 0;
    let target = loop {
      let candidate = backup_path(&self.corpus_path, stamp, attempt);
      let taken = tokio::fs::try_exists(&candidate)
        .await
        .map_err(|source| io_error(&candidate, source))?;
      if !taken {
        break candidate;
      }
      attempt += 1;
    };

    tokio::fs::copy(&self.corpus_path, &target)
      .await
      .map_err(|source| io_error(&self.corpus_path, source))?;
    tracing::debug!(backup = %target.display(), "corpus backed up");
    Ok(target)
  }

  async fn save_corpus(&self, corpus: &[ConflictRecord]) -> Result<()> {
    Self::write_json(&self.corpus_path, corpus).await
  }

  async fn save_checkpoints(&self, checkpoints: &Checkpoints) -> Result<()> {
    Self::write_json(&self.checkpoint_path, checkpoints).await
  }
}
