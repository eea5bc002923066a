//! Extraction of a JSON payload from a chat reply.
//!
//! Models often wrap JSON in a Markdown code fence, sometimes with a language
//! tag (```` ```json ````). The payload is whatever sits inside the first
//! fence, or the whole reply when there is none.

/// Return the payload of `text` with any surrounding code fence and leading
/// language tag removed, trimmed of whitespace.
pub fn strip_code_fence(text: &str) -> &str {
  let Some((_, rest)) = text.split_once("```") else {
    return text.trim();
  };

  let body = match rest.split_once('\n') {
    Some((tag, body)) if is_language_tag(tag) => body,
    _ => {
      // Single-line fence such as ```json{"a":1}```.
      let untagged = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
      if untagged.trim_start().starts_with(['{', '[']) {
        untagged
      } else {
        rest
      }
    }
  };

  body
    .split_once("```")
    .map_or(body, |(inner, _)| inner)
    .trim()
}

fn is_language_tag(s: &str) -> bool {
  s.trim()
    .chars()
    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
  use super::strip_code_fence;

  #[test]
  fn bare_json_is_trimmed() {
    assert_eq!(strip_code_fence("  {\"a\": 1}\n"), "{\"a\": 1}");
  }

  #[test]
  fn tagged_fence() {
    let reply = "```json\n{\"is_duplicate\": false}\n```";
    assert_eq!(strip_code_fence(reply), "{\"is_duplicate\": false}");
  }

  #[test]
  fn untagged_fence_with_prose() {
    let reply = "Here is my analysis:\n```\n[1, 2]\n```\nLet me know.";
    assert_eq!(strip_code_fence(reply), "[1, 2]");
  }

  #[test]
  fn single_line_fence() {
    assert_eq!(strip_code_fence("```json{\"a\":1}```"), "{\"a\":1}");
    assert_eq!(strip_code_fence("```{\"a\":1}```"), "{\"a\":1}");
  }

  #[test]
  fn unterminated_fence_keeps_remainder() {
    assert_eq!(strip_code_fence("```JSON\n{\"a\":1}"), "{\"a\":1}");
  }
}
