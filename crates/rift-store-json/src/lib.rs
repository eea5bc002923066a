//! Flat-file backend for the Rift conflict corpus.
//!
//! The corpus and the checkpoint map each live in one pretty-printed JSON
//! document, read and rewritten wholesale. Every rewrite goes through a
//! sibling temp file and a rename, and the corpus is copied aside before it is
//! replaced.

mod encode;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::JsonStore;

#[cfg(test)]
mod tests;
