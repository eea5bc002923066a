//! Verification adapter: asks OpenAI whether a candidate duplicates the
//! subject's existing records and whether its source is credible.

use serde::Deserialize;

use rift_core::{
  provider::{JudgeProvider, Judgment},
  record::{CandidateRecord, ConflictRecord, ConflictType},
};

use crate::{
  Result,
  chat::{ChatClient, ChatConfig, ChatRequest, Message},
  fence::strip_code_fence,
  prompt::{VERIFIER_SYSTEM_PROMPT, verification_prompt},
};

const TEMPERATURE: f32 = 0.1;
const MAX_TOKENS: u32 = 500;

pub struct OpenAiJudge {
  chat: ChatClient,
}

impl OpenAiJudge {
  pub fn new(config: ChatConfig) -> Result<Self> {
    Ok(Self {
      chat: ChatClient::new(config)?,
    })
  }
}

impl JudgeProvider for OpenAiJudge {
  type Error = crate::Error;

  async fn judge(
    &self,
    candidate: &CandidateRecord,
    existing: &[&ConflictRecord],
  ) -> Result<Judgment> {
    let prompt = verification_prompt(candidate, existing)?;
    let request = ChatRequest {
      messages: vec![
        Message::system(VERIFIER_SYSTEM_PROMPT),
        Message::user(&prompt),
      ],
      temperature: Some(TEMPERATURE),
      max_tokens: Some(MAX_TOKENS),
      ..ChatRequest::default()
    };

    let content = self.chat.complete(&request).await?;
    tracing::debug!(candidate = %candidate.name, "verifier reply: {content}");
    parse_judgment(&content)
  }
}

/// The verifier's reply. `is_duplicate` is required: a reply that does not say
/// is unusable and fails the candidate.
#[derive(Deserialize)]
struct RawJudgment {
  is_duplicate:     bool,
  reason:           Option<String>,
  recommended_type: Option<String>,
  suggested_id:     Option<String>,
  validated_name:   Option<String>,
  is_credible:      Option<bool>,
  credibility_note: Option<String>,
}

impl From<RawJudgment> for Judgment {
  fn from(raw: RawJudgment) -> Self {
    let recommended_type = raw.recommended_type.as_deref().and_then(|code| {
      let parsed = ConflictType::from_code(code);
      if parsed.is_none() {
        tracing::warn!("verifier recommended unknown type {code:?}; keeping candidate's");
      }
      parsed
    });

    Judgment {
      is_duplicate: raw.is_duplicate,
      reason: raw.reason,
      is_credible: raw.is_credible.unwrap_or(true),
      credibility_note: raw.credibility_note,
      recommended_type,
      suggested_id: raw.suggested_id,
      validated_name: raw.validated_name,
    }
  }
}

/// Parse a verifier reply, fenced or bare.
pub fn parse_judgment(content: &str) -> Result<Judgment> {
  let raw: RawJudgment = serde_json::from_str(strip_code_fence(content))?;
  Ok(raw.into())
}
