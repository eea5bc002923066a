//! Production adapters for Rift's two external providers.
//!
//! [`PerplexityClient`] retrieves candidate events; [`OpenAiJudge`] judges
//! them against the existing corpus. Both speak the OpenAI-style
//! `/chat/completions` protocol through a shared [`chat::ChatClient`].

pub mod chat;
pub mod error;
pub mod fence;
pub mod openai;
pub mod perplexity;
pub mod prompt;

pub use error::{Error, Result};
pub use openai::OpenAiJudge;
pub use perplexity::PerplexityClient;
