//! The `CorpusStore` trait.
//!
//! Implemented by storage backends (e.g. `rift-store-json`). The run
//! controller depends on this abstraction and calls each write method at most
//! once per run.

use std::{future::Future, path::PathBuf};

use crate::{checkpoint::Checkpoints, record::ConflictRecord};

/// Durable home of the corpus and the checkpoint map.
pub trait CorpusStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Load the full corpus. A missing corpus is an error, never an empty one.
  fn load_corpus(
    &self,
  ) -> impl Future<Output = Result<Vec<ConflictRecord>, Self::Error>> + Send + '_;

  /// Load the checkpoint map; an absent document yields an empty map.
  fn load_checkpoints(
    &self,
  ) -> impl Future<Output = Result<Checkpoints, Self::Error>> + Send + '_;

  /// Copy the current corpus document aside and return the copy's location.
  /// Must complete before [`CorpusStore::save_corpus`] touches the original.
  fn backup_corpus(
    &self,
  ) -> impl Future<Output = Result<PathBuf, Self::Error>> + Send + '_;

  /// Replace the corpus document wholesale.
  fn save_corpus<'a>(
    &'a self,
    corpus: &'a [ConflictRecord],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Replace the checkpoint document wholesale.
  fn save_checkpoints<'a>(
    &'a self,
    checkpoints: &'a Checkpoints,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
