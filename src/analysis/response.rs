//! Turning raw model output into an [`InsightRecord`].

use crate::analysis::InsightRecord;
use crate::{InsightsError, Result};

/// Characters of raw output kept in a parse error.
pub const EXCERPT_CHARS: usize = 500;

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

/// Strip a markdown code fence around a model response.
///
/// A ```` ```json ```` fence wins over a bare one. A bare fence drops a
/// language tag on its opening line. A missing closing fence keeps the rest
/// of the text, which is what truncated output looks like. Text without a
/// fence is only trimmed.
pub fn strip_code_fence(text: &str) -> &str {
    if let Some(start) = text.find(JSON_FENCE) {
        return until_closing_fence(&text[start + JSON_FENCE.len()..]).trim();
    }

    if let Some(start) = text.find(FENCE) {
        let body = skip_language_tag(&text[start + FENCE.len()..]);
        return until_closing_fence(body).trim();
    }

    text.trim()
}

fn until_closing_fence(body: &str) -> &str {
    match body.find(FENCE) {
        Some(end) => &body[..end],
        None => body,
    }
}

fn skip_language_tag(body: &str) -> &str {
    let Some(newline) = body.find('\n') else {
        return body;
    };
    let tag = body[..newline].trim();
    let is_tag = !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if is_tag {
        &body[newline + 1..]
    } else {
        body
    }
}

/// Parse a model response into a record.
pub fn parse_insights(raw: &str) -> Result<InsightRecord> {
    let body = strip_code_fence(raw);
    serde_json::from_str(body).map_err(|e| InsightsError::MalformedResponse {
        message: e.to_string(),
        excerpt: excerpt(body, EXCERPT_CHARS),
    })
}

/// First `max_chars` characters of `text`, with `...` appended when cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
