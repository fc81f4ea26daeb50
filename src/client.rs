// src/client.rs
// HTTP transport for the generation service, with error classification

use async_trait::async_trait;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::error::Error as StdError;
use std::io::ErrorKind;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::analysis::{AnalysisResult, AnalyzePayload, MessageSuggestion, SuggestPayload, Tone};
use crate::config::ClientConfig;
use crate::error::{
    ApiError, BAD_RESPONSE_MESSAGE, MISSING_BASE_URL_MESSAGE, NextMoveError, Result as NextMoveResult, SERVER_MESSAGE,
};
use crate::normalize::parse_generate_reply_response;
use crate::prompt::{ReplyPrompt, build_reply_prompt};
use crate::reply::{GenerateReplyResult, ReplyRequest};

pub const GENERATE_PATH: &str = "/generate";
pub const ANALYZE_PATH: &str = "/analyze";
pub const SUGGEST_PATH: &str = "/suggest";

/// Connect timeout, kept below the overall request timeout
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Anything that can turn a request into normalized reply candidates.
///
/// Implementations make exactly one attempt per call; retrying is up to the caller.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate_reply(&self, request: &ReplyRequest) -> Result<GenerateReplyResult, ApiError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateReplyBody<'a> {
    incoming_message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    goal: Option<&'a str>,
    style: &'a str,
    locale: &'a str,
    app_version: &'a str,
    prompt: ReplyPrompt,
}

/// Client for the NextMove generation service
pub struct ReplyClient {
    client: Client,
    base_url: Option<String>,
    locale: String,
    app_version: String,
    pub request_timeout: Duration,
}

impl ReplyClient {
    pub fn new(config: &ClientConfig) -> NextMoveResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(config.request_timeout))
            .build()
            .map_err(|e| {
                warn!("Failed to build HTTP client: {}", e);
                NextMoveError::Config(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self::from_client(client, config))
    }

    /// Create from an existing reqwest::Client
    pub fn from_client(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            locale: config.locale.clone(),
            app_version: config.app_version.clone(),
            request_timeout: config.request_timeout,
        }
    }

    fn endpoint(&self, path: &str) -> Result<String, ApiError> {
        let base = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| ApiError::server(MISSING_BASE_URL_MESSAGE))?;

        url::Url::parse(base)
            .map_err(|e| ApiError::server(format!("Invalid API base URL '{}': {}", base, e)))?;

        Ok(format!("{}{}", base.trim_end_matches('/'), path))
    }

    /// POST a JSON body and decode the JSON reply. One attempt, always classified.
    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let url = self.endpoint(path)?;
        let request_id = Uuid::new_v4().to_string();

        debug!(request_id = %request_id, url = %url, "Sending request");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .timeout(self.request_timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                let err = classify_transport_error(&e);
                warn!(request_id = %request_id, kind = %err.kind(), error = %e, "Request failed");
                err
            })?;

        let status = response.status();
        if !status.is_success() {
            let header_window = parse_retry_after(response.headers());
            let body = response.text().await.unwrap_or_default();
            let window = header_window.or_else(|| retry_after_from_body(&body));
            let err = classify_status(status, window).unwrap_or_else(|| ApiError::server(SERVER_MESSAGE));
            warn!(
                request_id = %request_id,
                status = %status,
                kind = %err.kind(),
                "Server rejected request"
            );
            return Err(err);
        }

        let text = response.text().await.map_err(|e| classify_transport_error(&e))?;
        let value: Value = serde_json::from_str(&text).map_err(|e| {
            warn!(request_id = %request_id, error = %e, "Response body is not JSON");
            ApiError::server(BAD_RESPONSE_MESSAGE)
        })?;

        debug!(request_id = %request_id, status = %status, bytes = text.len(), "Response received");
        Ok(value)
    }

    async fn post_typed<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let value = self.post_json(path, body).await?;
        serde_json::from_value(value).map_err(|e| {
            warn!(path = %path, error = %e, "Response does not match expected shape");
            ApiError::server(BAD_RESPONSE_MESSAGE)
        })
    }

    /// Generate reply candidates for a message
    pub async fn generate_reply(&self, request: &ReplyRequest) -> Result<GenerateReplyResult, ApiError> {
        let body = GenerateReplyBody {
            incoming_message: request.message(),
            goal: request.goal(),
            style: request.style().as_str(),
            locale: &self.locale,
            app_version: &self.app_version,
            prompt: build_reply_prompt(request),
        };

        info!(
            style = %request.style(),
            message_chars = request.message().chars().count(),
            has_goal = request.goal().is_some(),
            "Generating reply"
        );

        let payload = self.post_json(GENERATE_PATH, &body).await?;
        parse_generate_reply_response(&payload).map_err(|e| {
            warn!(code = e.code(), "Generation payload rejected");
            ApiError::from(e)
        })
    }

    /// Ask the service to read a whole conversation
    pub async fn analyze_conversation(
        &self,
        character: &str,
        conversation: &str,
    ) -> Result<AnalysisResult, ApiError> {
        let body = AnalyzePayload {
            character,
            conversation,
        };
        self.post_typed(ANALYZE_PATH, &body).await
    }

    /// Ask for a single next message in the given tone
    pub async fn suggest_message(
        &self,
        character: &str,
        tone: Tone,
        conversation: &str,
    ) -> Result<MessageSuggestion, ApiError> {
        let body = SuggestPayload {
            character,
            tone,
            conversation,
        };
        self.post_typed(SUGGEST_PATH, &body).await
    }
}

#[async_trait]
impl ReplyGenerator for ReplyClient {
    async fn generate_reply(&self, request: &ReplyRequest) -> Result<GenerateReplyResult, ApiError> {
        ReplyClient::generate_reply(self, request).await
    }
}

/// Map a non-success status to an error. Success statuses map to `None`.
///
/// `retry_after` is the window the server announced, if any.
pub fn classify_status(status: StatusCode, retry_after: Option<Duration>) -> Option<ApiError> {
    if status.is_success() {
        None
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        Some(ApiError::rate_limit(retry_after))
    } else {
        Some(ApiError::server(SERVER_MESSAGE))
    }
}

/// Map a reqwest failure to an error kind
pub fn classify_transport_error(err: &reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::timeout()
    } else if err.is_connect() || connection_dropped(err) {
        ApiError::offline()
    } else {
        ApiError::server(SERVER_MESSAGE)
    }
}

/// Whether the connection was reset or closed mid-exchange
fn connection_dropped(err: &reqwest::Error) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = err.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            if matches!(
                io.kind(),
                ErrorKind::ConnectionReset
                    | ErrorKind::ConnectionAborted
                    | ErrorKind::BrokenPipe
                    | ErrorKind::UnexpectedEof
                    | ErrorKind::NotConnected
            ) {
                return true;
            }
        }
        if let Some(h) = cause.downcast_ref::<hyper::Error>() {
            if h.is_incomplete_message() || h.is_closed() {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

/// `Retry-After` in delta-seconds; HTTP dates are not honored
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Some deployments put the window in the body as `retryAfterMs`
fn retry_after_from_body(body: &str) -> Option<Duration> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("retryAfterMs")?
        .as_u64()
        .map(Duration::from_millis)
}
