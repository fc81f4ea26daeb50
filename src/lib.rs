// src/lib.rs
// NextMove - reply suggestions for incoming chat messages

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod analysis;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod normalize;
pub mod prompt;
pub mod reply;
pub mod session;
pub mod store;

pub use catalog::{Catalog, CharacterProfile, Style};
pub use client::{ReplyClient, ReplyGenerator};
pub use error::{ApiError, ApiErrorKind, NextMoveError, ParseError, Result};
pub use normalize::parse_generate_reply_response;
pub use prompt::{ReplyPrompt, build_reply_prompt};
pub use reply::{GenerateReplyResult, ReplyRequest, ReplyResult};
pub use session::{Outcome, ReplySession};
pub use store::PreferenceStore;
