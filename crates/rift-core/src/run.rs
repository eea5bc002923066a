//! The run controller: drives the reconciliation loop across every configured
//! subject and owns the single commit point.
//!
//! Commit order for a run that accepted records is backup, corpus, then
//! checkpoints. A crash after the backup leaves the original corpus intact; a
//! crash after the corpus write leaves stale checkpoints, and the next run
//! re-fetches a window whose events are already in the corpus and get rejected
//! as duplicates.

use std::{path::PathBuf, time::Duration};

use chrono::NaiveDate;

use crate::{
  Error, Result,
  provider::{CandidateProvider, JudgeProvider},
  reconcile::{Reconciled, Reconciler, SubjectReport},
  record::ConflictRecord,
  store::CorpusStore,
  subject::Subject,
};

#[derive(Debug, Clone)]
pub struct RunOptions {
  /// Run every provider call but write nothing.
  pub preview: bool,
  /// Delay between consecutive subjects.
  pub pacing:  Duration,
  /// The run's current date: new checkpoints and missing record dates.
  pub today:   NaiveDate,
}

/// What the commit step did with the run's results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
  /// Preview mode; nothing was written.
  Preview,
  /// No new records; only checkpoints were written.
  CheckpointsOnly,
  /// Backup taken, corpus rewritten, checkpoints written.
  Committed { backup: PathBuf },
}

/// Reporting view of a finished run. Never persisted.
#[derive(Debug, Clone)]
pub struct RunSummary {
  pub subjects_processed: usize,
  pub reports:            Vec<(Subject, SubjectReport)>,
  pub accepted:           Vec<ConflictRecord>,
  pub commit:             CommitOutcome,
}

/// Ties the two providers and the store together for one run.
pub struct Updater<C, J, S> {
  candidates: C,
  judge:      J,
  store:      S,
  options:    RunOptions,
}

impl<C, J, S> Updater<C, J, S>
where
  C: CandidateProvider,
  J: JudgeProvider,
  S: CorpusStore,
{
  pub fn new(candidates: C, judge: J, store: S, options: RunOptions) -> Self {
    Self {
      candidates,
      judge,
      store,
      options,
    }
  }

  pub fn store(&self) -> &S { &self.store }

  /// Process `subjects` in order and commit the outcome.
  ///
  /// State is loaded before the first provider call, so a missing corpus or a
  /// malformed checkpoint document aborts the run without touching either
  /// provider. Provider failures never abort it.
  pub async fn run(&self, subjects: &[Subject]) -> Result<RunSummary> {
    if subjects.is_empty() {
      return Err(Error::NoSubjects);
    }

    let corpus = self.store.load_corpus().await.map_err(store_error)?;
    let checkpoints = self.store.load_checkpoints().await.map_err(store_error)?;
    tracing::info!("loaded {} existing conflicts", corpus.len());
    if self.options.preview {
      tracing::info!("dry run: no changes will be saved");
    }

    let mut reconciler = Reconciler::new(corpus, checkpoints, self.options.today);
    let mut reports = Vec::with_capacity(subjects.len());

    for (i, subject) in subjects.iter().enumerate() {
      tracing::info!(
        "[{}/{}] {} ({})",
        i + 1,
        subjects.len(),
        subject.name,
        subject.code
      );
      let report = reconciler
        .reconcile_subject(subject, &self.candidates, &self.judge)
        .await;
      reports.push((subject.clone(), report));

      if i + 1 < subjects.len() && !self.options.pacing.is_zero() {
        tokio::time::sleep(self.options.pacing).await;
      }
    }

    let reconciled = reconciler.finish();
    let commit = self.commit(&reconciled).await?;

    Ok(RunSummary {
      subjects_processed: subjects.len(),
      reports,
      accepted: reconciled.accepted,
      commit,
    })
  }

  async fn commit(&self, reconciled: &Reconciled) -> Result<CommitOutcome> {
    if self.options.preview {
      return Ok(CommitOutcome::Preview);
    }

    if reconciled.accepted.is_empty() {
      self
        .store
        .save_checkpoints(&reconciled.checkpoints)
        .await
        .map_err(store_error)?;
      tracing::info!("state updated (no new conflicts)");
      return Ok(CommitOutcome::CheckpointsOnly);
    }

    let backup = self.store.backup_corpus().await.map_err(store_error)?;
    tracing::info!("backup created: {}", backup.display());
    self
      .store
      .save_corpus(&reconciled.corpus)
      .await
      .map_err(store_error)?;
    self
      .store
      .save_checkpoints(&reconciled.checkpoints)
      .await
      .map_err(store_error)?;
    tracing::info!("saved {} new conflicts", reconciled.accepted.len());

    Ok(CommitOutcome::Committed { backup })
  }
}

fn store_error<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::Store(Box::new(e))
}
