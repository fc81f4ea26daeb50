// src/error.rs
// Error types for NextMove: crate-wide errors, transport taxonomy, payload failures

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Retry window used when the server rate-limits without saying for how long
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(30);

pub const OFFLINE_MESSAGE: &str = "Bağlantı yok. İnterneti kontrol et.";
pub const TIMEOUT_MESSAGE: &str = "İstek zaman aşımına uğradı.";
pub const SERVER_MESSAGE: &str = "Sunucu yanıtı alınamadı.";
pub const BAD_RESPONSE_MESSAGE: &str = "Sunucu yanıtı anlaşılmadı.";
pub const MISSING_BASE_URL_MESSAGE: &str =
    "API base URL missing. Set NEXTMOVE_API_BASE_URL.";

/// Whole seconds left in a window, rounded up
pub fn countdown_secs(remaining: Duration) -> u64 {
    let secs = remaining.as_secs();
    if remaining.subsec_nanos() > 0 { secs + 1 } else { secs }
}

/// Rate-limit text carrying the actual wait
pub fn rate_limit_message(secs: u64) -> String {
    format!("Çok fazla istek. {} saniye sonra tekrar dene.", secs)
}

/// Main error type for the NextMove library
#[derive(Error, Debug)]
pub enum NextMoveError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("unknown error: {0}")]
    Other(String),
}

/// Convenience type alias for Result using NextMoveError
pub type Result<T> = std::result::Result<T, NextMoveError>;

impl From<String> for NextMoveError {
    fn from(s: String) -> Self {
        NextMoveError::Other(s)
    }
}

/// Closed set of transport failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    RateLimit,
    Offline,
    Timeout,
    Server,
}

impl ApiErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RateLimit => "rate_limit",
            Self::Offline => "offline",
            Self::Timeout => "timeout",
            Self::Server => "server",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every failure of a generation request, already classified.
///
/// The transport never hands an unclassified error to its caller: network,
/// HTTP status, decoding and payload validation failures all end up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{message}")]
    RateLimit { message: String, retry_after: Duration },

    #[error("{message}")]
    Offline { message: String },

    #[error("{message}")]
    Timeout { message: String },

    #[error("{message}")]
    Server { message: String },
}

impl ApiError {
    pub fn rate_limit(retry_after: Option<Duration>) -> Self {
        let retry_after = retry_after.unwrap_or(DEFAULT_RETRY_AFTER);
        Self::RateLimit {
            message: rate_limit_message(countdown_secs(retry_after)),
            retry_after,
        }
    }

    pub fn offline() -> Self {
        Self::Offline {
            message: OFFLINE_MESSAGE.to_string(),
        }
    }

    pub fn timeout() -> Self {
        Self::Timeout {
            message: TIMEOUT_MESSAGE.to_string(),
        }
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        match self {
            Self::RateLimit { .. } => ApiErrorKind::RateLimit,
            Self::Offline { .. } => ApiErrorKind::Offline,
            Self::Timeout { .. } => ApiErrorKind::Timeout,
            Self::Server { .. } => ApiErrorKind::Server,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::RateLimit { message, .. }
            | Self::Offline { message }
            | Self::Timeout { message }
            | Self::Server { message } => message,
        }
    }

    /// Only rate-limit errors carry a retry window
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimit { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }

    /// Whether sending the same request again can succeed without user action.
    /// Server errors are left to the user.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Server { .. })
    }
}

impl From<ParseError> for ApiError {
    fn from(err: ParseError) -> Self {
        ApiError::server(err.to_string())
    }
}

/// Rejections produced while normalizing a generation payload
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("Yanıt formatı geçersiz.")]
    InvalidFormat,

    #[error("Sunucudan boş cevap geldi.")]
    EmptyReply,
}

impl ParseError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidFormat => "invalid_format",
            Self::EmptyReply => "empty_reply",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // ApiError construction
    // ============================================================================

    #[test]
    fn test_rate_limit_defaults_to_thirty_seconds() {
        let err = ApiError::rate_limit(None);
        assert_eq!(err.kind(), ApiErrorKind::RateLimit);
        assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));
        assert_eq!(err.message(), "Çok fazla istek. 30 saniye sonra tekrar dene.");
    }

    #[test]
    fn test_rate_limit_keeps_server_window() {
        let err = ApiError::rate_limit(Some(Duration::from_secs(5)));
        assert_eq!(err.retry_after(), Some(Duration::from_secs(5)));
        assert_eq!(err.message(), "Çok fazla istek. 5 saniye sonra tekrar dene.");
    }

    #[test]
    fn test_rate_limit_message_rounds_window_up() {
        let err = ApiError::rate_limit(Some(Duration::from_millis(1_500)));
        assert_eq!(err.message(), rate_limit_message(2));
    }

    #[test]
    fn test_countdown_rounds_up() {
        assert_eq!(countdown_secs(Duration::from_secs(30)), 30);
        assert_eq!(countdown_secs(Duration::from_millis(29_001)), 30);
        assert_eq!(countdown_secs(Duration::from_millis(1)), 1);
        assert_eq!(countdown_secs(Duration::ZERO), 0);
    }

    #[test]
    fn test_only_rate_limit_has_retry_after() {
        assert_eq!(ApiError::offline().retry_after(), None);
        assert_eq!(ApiError::timeout().retry_after(), None);
        assert_eq!(ApiError::server("boom").retry_after(), None);
    }

    #[test]
    fn test_kinds_and_display() {
        assert_eq!(ApiError::offline().kind().as_str(), "offline");
        assert_eq!(ApiError::timeout().kind().as_str(), "timeout");
        let err = ApiError::server("boom");
        assert_eq!(err.kind().to_string(), "server");
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_retryable() {
        assert!(ApiError::rate_limit(None).is_retryable());
        assert!(ApiError::offline().is_retryable());
        assert!(ApiError::timeout().is_retryable());
        assert!(!ApiError::server("x").is_retryable());
    }

    // ============================================================================
    // ParseError
    // ============================================================================

    #[test]
    fn test_parse_error_becomes_server_error() {
        let err: ApiError = ParseError::EmptyReply.into();
        assert_eq!(err.kind(), ApiErrorKind::Server);
        assert_eq!(err.message(), "Sunucudan boş cevap geldi.");
    }

    #[test]
    fn test_parse_error_codes() {
        assert_eq!(ParseError::InvalidFormat.code(), "invalid_format");
        assert_eq!(ParseError::EmptyReply.code(), "empty_reply");
    }

    // ============================================================================
    // NextMoveError conversions
    // ============================================================================

    #[test]
    fn test_from_string() {
        let err: NextMoveError = "some error".to_string().into();
        assert!(matches!(err, NextMoveError::Other(_)));
        assert!(err.to_string().contains("some error"));
    }

    #[test]
    fn test_api_error_is_transparent() {
        let err: NextMoveError = ApiError::timeout().into();
        assert_eq!(err.to_string(), TIMEOUT_MESSAGE);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: NextMoveError = io_err.into();
        assert!(matches!(err, NextMoveError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }
}
