//! Retrieval adapter: asks Perplexity for recent actions against a subject,
//! constrained to a JSON schema.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Value, json};

use rift_core::{
  provider::{CandidateProvider, FetchWindow},
  record::{CandidateRecord, ConflictType},
  subject::Subject,
};

use crate::{
  Result,
  chat::{ChatClient, ChatConfig, ChatRequest, Message},
  fence::strip_code_fence,
  prompt::retrieval_prompt,
};

/// Name given to an action the provider left unnamed.
const UNNAMED_ACTION: &str = "Unknown Action";

pub struct PerplexityClient {
  chat: ChatClient,
}

impl PerplexityClient {
  pub fn new(config: ChatConfig) -> Result<Self> {
    Ok(Self {
      chat: ChatClient::new(config)?,
    })
  }
}

impl CandidateProvider for PerplexityClient {
  type Error = crate::Error;

  async fn fetch(
    &self,
    subject: &Subject,
    window: FetchWindow,
  ) -> Result<Vec<CandidateRecord>> {
    let prompt = retrieval_prompt(&subject.name, window);
    let request = ChatRequest {
      messages: vec![Message::user(&prompt)],
      response_format: Some(json!({
        "type": "json_schema",
        "json_schema": { "schema": actions_schema() },
      })),
      ..ChatRequest::default()
    };

    let content = self.chat.complete(&request).await?;
    tracing::debug!(subject = %subject.code, model = self.chat.model(), "retrieval reply: {content}");
    parse_actions(&content)
  }
}

/// JSON schema for the `{ "actions": [...] }` reply.
pub fn actions_schema() -> Value {
  json!({
    "type": "object",
    "properties": {
      "actions": {
        "type": "array",
        "items": {
          "type": "object",
          "properties": {
            "name":             { "type": "string" },
            "startDate":        { "type": "string" },
            "endDate":          { "type": ["string", "null"] },
            "description":      { "type": "string" },
            "type":             { "type": "string" },
            "casualties_us":    { "type": "integer" },
            "casualties_total": { "type": "integer" },
            "outcome":          { "type": "string" },
            "source_url":       { "type": "string" }
          },
          "required": [
            "name", "startDate", "endDate", "description", "type",
            "casualties_us", "casualties_total", "outcome", "source_url"
          ]
        }
      }
    },
    "required": ["actions"]
  })
}

// ─── Reply parsing ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ActionsReply {
  #[serde(default)]
  actions: Vec<RawAction>,
}

/// One action as the provider reports it. Everything is optional and loosely
/// typed so a single sloppy field degrades that field, not the whole reply.
#[derive(Deserialize)]
struct RawAction {
  name:             Option<String>,
  #[serde(rename = "startDate")]
  start_date:       Option<String>,
  #[serde(rename = "endDate")]
  end_date:         Option<String>,
  description:      Option<String>,
  #[serde(rename = "type")]
  kind:             Option<String>,
  casualties_us:    Option<Value>,
  casualties_total: Option<Value>,
  outcome:          Option<String>,
  source_url:       Option<String>,
}

impl RawAction {
  fn into_candidate(self) -> CandidateRecord {
    CandidateRecord {
      subject_code:     String::new(),
      subject_name:     String::new(),
      name:             self
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| UNNAMED_ACTION.to_owned()),
      start_date:       parse_date(self.start_date.as_deref()),
      end_date:         parse_date(self.end_date.as_deref()),
      description:      self.description.unwrap_or_default(),
      kind:             self.kind.as_deref().and_then(ConflictType::from_code),
      casualties_us:    count(self.casualties_us.as_ref()),
      casualties_total: count(self.casualties_total.as_ref()),
      outcome:          self.outcome.filter(|o| !o.trim().is_empty()),
      source_url:       self.source_url.unwrap_or_default(),
    }
  }
}

/// Parse a retrieval reply into candidates, in reply order.
pub fn parse_actions(content: &str) -> Result<Vec<CandidateRecord>> {
  let reply: ActionsReply = serde_json::from_str(strip_code_fence(content))?;
  Ok(
    reply
      .actions
      .into_iter()
      .map(RawAction::into_candidate)
      .collect(),
  )
}

/// `YYYY-MM-DD`, or `None` for anything absent, blank or unparseable.
fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
  let raw = raw?.trim();
  if raw.is_empty() || raw.eq_ignore_ascii_case("null") {
    return None;
  }
  match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
    Ok(date) => Some(date),
    Err(_) => {
      tracing::debug!("ignoring unparseable date {raw:?}");
      None
    }
  }
}

/// A non-negative count from a JSON number or numeric string; zero otherwise.
fn count(raw: Option<&Value>) -> u64 {
  match raw {
    Some(Value::Number(n)) => n
      .as_u64()
      .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
      .unwrap_or(0),
    Some(Value::String(s)) => s.trim().replace(',', "").parse().unwrap_or(0),
    _ => 0,
  }
}
