//! Core types and the reconciliation pipeline for the Rift conflict corpus.
//!
//! This crate has no HTTP or filesystem code. Providers and
//! storage backends plug in through the traits in [`provider`] and [`store`].

pub mod checkpoint;
pub mod error;
pub mod provider;
pub mod reconcile;
pub mod record;
pub mod run;
pub mod source;
pub mod store;
pub mod subject;
pub mod verify;

pub use error::{Error, Result};
