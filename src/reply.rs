// src/reply.rs
// Reply request, normalized generation result and history entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::catalog::Style;
use crate::error::{NextMoveError, Result};

/// Number of alternatives every normalized result carries
pub const ALTERNATIVE_COUNT: usize = 3;

/// Minimum number of words an incoming message needs before we send it
pub const MIN_MESSAGE_WORDS: usize = 2;

/// Why a raw message was rejected before any request was built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageIssue {
    Empty,
    TooShort,
}

impl fmt::Display for MessageIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Mesaj boş olamaz."),
            Self::TooShort => f.write_str("Biraz daha yaz, en az iki kelime."),
        }
    }
}

/// Input-side validation of a pasted message. Returns the trimmed text.
pub fn check_message(raw: &str) -> std::result::Result<&str, MessageIssue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(MessageIssue::Empty);
    }
    if trimmed.split_whitespace().count() < MIN_MESSAGE_WORDS {
        return Err(MessageIssue::TooShort);
    }
    Ok(trimmed)
}

/// A request for reply suggestions. The message is always trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRequest {
    message: String,
    goal: Option<String>,
    style: Style,
}

impl ReplyRequest {
    pub fn new(message: &str, goal: Option<&str>, style: Style) -> Result<Self> {
        let message = message.trim();
        if message.is_empty() {
            return Err(NextMoveError::InvalidInput("message is empty".to_string()));
        }
        let goal = goal
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string);

        Ok(Self {
            message: message.to_string(),
            goal,
            style,
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn goal(&self) -> Option<&str> {
        self.goal.as_deref()
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Same message and goal, different style
    pub fn with_style(&self, style: Style) -> Self {
        Self {
            style,
            ..self.clone()
        }
    }
}

/// Validated, bounded reply candidates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReplyResult {
    pub best_reply: String,
    pub alternatives: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
}

/// One entry of the recent-replies history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyResult {
    pub id: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    pub style: Style,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub generated_at: DateTime<Utc>,
    pub result: GenerateReplyResult,
}

impl ReplyResult {
    /// Fresh history entry for a successful generation
    pub fn new(request: &ReplyRequest, result: GenerateReplyResult) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            message: request.message().to_string(),
            goal: request.goal().map(str::to_string),
            style: request.style().clone(),
            generated_at: Utc::now(),
            result,
        }
    }

    /// Rebuild the request this entry was generated from
    pub fn request(&self) -> Result<ReplyRequest> {
        ReplyRequest::new(&self.message, self.goal.as_deref(), self.style.clone())
    }

    /// Same entry (same id) carrying a newer result for another style
    pub fn regenerated(&self, style: Style, result: GenerateReplyResult) -> Self {
        Self {
            id: self.id.clone(),
            message: self.message.clone(),
            goal: self.goal.clone(),
            style,
            generated_at: Utc::now(),
            result,
        }
    }
}
