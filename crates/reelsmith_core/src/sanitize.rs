//! Best-effort cleanup of model output into structured JSON.
//!
//! Models frequently wrap JSON in a markdown code fence. The sanitizer strips
//! one opening fence (optionally language-tagged) and one closing fence, then
//! makes a single parse attempt. Anything else, such as prose around the JSON
//! block, is returned as text with a diagnostic.

use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

const FENCE: &str = "```";

/// Outcome of sanitizing generated text.
#[derive(Debug, Clone, PartialEq)]
pub enum SanitizedResult {
    /// Output parsed as JSON.
    Parsed(Value),
    /// Output kept as cleaned text.
    Text {
        /// Text after fence removal and trimming
        text: String,
        /// Why parsing failed; `None` when the model returned nothing
        diagnostic: Option<String>,
    },
}

impl SanitizedResult {
    /// Whether the output parsed as JSON.
    pub fn is_parsed(&self) -> bool {
        matches!(self, SanitizedResult::Parsed(_))
    }

    /// Parse failure message, if any.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            SanitizedResult::Parsed(_) => None,
            SanitizedResult::Text { diagnostic, .. } => diagnostic.as_deref(),
        }
    }

    /// Convert into the JSON value placed in a response envelope.
    pub fn into_value(self) -> Value {
        match self {
            SanitizedResult::Parsed(value) => value,
            SanitizedResult::Text { text, .. } => Value::String(text),
        }
    }
}

impl Serialize for SanitizedResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SanitizedResult::Parsed(value) => value.serialize(serializer),
            SanitizedResult::Text { text, .. } => serializer.serialize_str(text),
        }
    }
}

/// Remove one leading and one trailing code fence, trimming whitespace.
///
/// A language tag directly after the opening fence (`json`, `JSON`, ...) is
/// removed with it when a line break, space or JSON opener follows. A bare
/// value on the fence line, as in ```` ```42``` ````, is kept.
///
/// # Examples
///
/// ```
/// use reelsmith_core::strip_fences;
///
/// assert_eq!(strip_fences("```json\n[1, 2]\n```"), "[1, 2]");
/// assert_eq!(strip_fences("```true```"), "true");
/// assert_eq!(strip_fences("  plain  "), "plain");
/// ```
pub fn strip_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix(FENCE) {
        let tag_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
            .unwrap_or(rest.len());
        let is_tag = rest[tag_len..]
            .chars()
            .next()
            .is_some_and(|next| next.is_whitespace() || next == '{' || next == '[');
        text = if is_tag { &rest[tag_len..] } else { rest };
    }
    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest;
    }
    text.trim()
}

/// Sanitize generated text into a [`SanitizedResult`].
///
/// # Examples
///
/// ```
/// use reelsmith_core::{SanitizedResult, sanitize};
/// use serde_json::json;
///
/// let result = sanitize("```json\n{\"a\":1}\n```");
/// assert_eq!(result, SanitizedResult::Parsed(json!({"a": 1})));
/// ```
pub fn sanitize(raw: &str) -> SanitizedResult {
    if raw.trim().is_empty() {
        return SanitizedResult::Text {
            text: String::new(),
            diagnostic: None,
        };
    }

    let cleaned = strip_fences(raw);
    if cleaned.is_empty() {
        return SanitizedResult::Text {
            text: String::new(),
            diagnostic: Some("Model output contained only code fences".to_string()),
        };
    }

    match serde_json::from_str::<Value>(cleaned) {
        Ok(value) => SanitizedResult::Parsed(value),
        Err(e) => {
            debug!(error = %e, length = cleaned.len(), "Generated text is not valid JSON");
            SanitizedResult::Text {
                text: cleaned.to_string(),
                diagnostic: Some(format!("Response is not valid JSON: {}", e)),
            }
        }
    }
}
