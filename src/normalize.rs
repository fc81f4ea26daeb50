// src/normalize.rs
// Turns an untrusted generation payload into a bounded, fixed-shape result

use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::reply::{ALTERNATIVE_COUNT, GenerateReplyResult};

/// Maximum characters a single reply may keep
pub const MAX_REPLY_CHARS: usize = 260;
/// A whitespace cut is only taken past this position
pub const MIN_CUT_POSITION: usize = 160;
pub const ELLIPSIS: char = '…';

/// Bound a reply to [`MAX_REPLY_CHARS`].
///
/// Over-long text is cut at its last whitespace when that whitespace lies
/// past [`MIN_CUT_POSITION`], otherwise hard-cut at the budget. Either way
/// the result ends with [`ELLIPSIS`]. Text within budget is returned as is.
pub fn limit_length(text: &str) -> String {
    if text.chars().count() <= MAX_REPLY_CHARS {
        return text.to_string();
    }

    let head: Vec<char> = text.chars().take(MAX_REPLY_CHARS).collect();
    let cut = match head.iter().rposition(|c| c.is_whitespace()) {
        Some(pos) if pos > MIN_CUT_POSITION => &head[..pos],
        _ => &head[..],
    };

    let mut bounded: String = cut.iter().collect::<String>().trim().to_string();
    bounded.push(ELLIPSIS);
    bounded
}

/// Trimmed text when the value is a string, empty otherwise
fn text_of(value: Option<&Value>) -> &str {
    value.and_then(Value::as_str).map(str::trim).unwrap_or("")
}

fn normalize_reply(value: Option<&Value>) -> Option<String> {
    let text = text_of(value);
    if text.is_empty() {
        None
    } else {
        Some(limit_length(text))
    }
}

fn optional_text(payload: &Map<String, Value>, key: &str) -> Option<String> {
    let text = text_of(payload.get(key));
    (!text.is_empty()).then(|| text.to_string())
}

/// Validate and shape a decoded generation payload.
///
/// Fails only when the payload is not a JSON object or its `bestReply` is
/// missing, non-string or blank. Sparse payloads are repaired: missing or
/// invalid alternatives are dropped and the list is padded with the best
/// reply, then cut to exactly [`ALTERNATIVE_COUNT`] entries.
pub fn parse_generate_reply_response(payload: &Value) -> Result<GenerateReplyResult, ParseError> {
    let Some(payload) = payload.as_object() else {
        return Err(ParseError::InvalidFormat);
    };

    let best_reply = normalize_reply(payload.get("bestReply")).ok_or(ParseError::EmptyReply)?;

    let mut alternatives: Vec<String> = payload
        .get("alternatives")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|item| normalize_reply(Some(item))).collect())
        .unwrap_or_default();

    while alternatives.len() < ALTERNATIVE_COUNT {
        alternatives.push(best_reply.clone());
    }
    alternatives.truncate(ALTERNATIVE_COUNT);

    Ok(GenerateReplyResult {
        best_reply,
        alternatives,
        explanation: optional_text(payload, "explanation"),
        follow_up: optional_text(payload, "followUp"),
    })
}
