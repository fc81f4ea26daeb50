// src/config/env.rs
// Environment-based configuration - single source of truth for all env vars

use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Request timeout when NEXTMOVE_REQUEST_TIMEOUT_SECS is unset
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_LOCALE: &str = "tr-TR";

/// Settings the transport needs, resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the generation service; `None` surfaces as a server error per request
    pub base_url: Option<String>,
    pub request_timeout: Duration,
    pub locale: String,
    pub app_version: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            locale: DEFAULT_LOCALE.to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Configuration validation result
#[derive(Debug)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ConfigValidation {
    fn new() -> Self {
        Self {
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Format as a human-readable report
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        if !self.errors.is_empty() {
            lines.push("Errors:".to_string());
            for err in &self.errors {
                lines.push(format!("  - {}", err));
            }
        }

        if !self.warnings.is_empty() {
            lines.push("Warnings:".to_string());
            for warn in &self.warnings {
                lines.push(format!("  - {}", warn));
            }
        }

        if lines.is_empty() {
            "Configuration OK".to_string()
        } else {
            lines.join("\n")
        }
    }
}

/// Environment configuration - all env vars in one place
#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Generation service base URL (NEXTMOVE_API_BASE_URL, then EXPO_PUBLIC_API_BASE_URL)
    pub api_base_url: Option<String>,
    /// Per-request timeout (NEXTMOVE_REQUEST_TIMEOUT_SECS)
    pub request_timeout: Duration,
    /// Where preferences and history live (NEXTMOVE_DATA_DIR)
    pub data_dir: PathBuf,
    /// Locale sent with every request (NEXTMOVE_LOCALE)
    pub locale: String,
    /// Invalid values seen while loading, reported by `validate`
    rejected: Vec<String>,
}

impl EnvConfig {
    /// Load all environment configuration (call once at startup)
    pub fn load() -> Self {
        info!("Loading environment configuration");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut rejected = Vec::new();

        let api_base_url = read("NEXTMOVE_API_BASE_URL").or_else(|| read("EXPO_PUBLIC_API_BASE_URL"));

        let request_timeout = match read("NEXTMOVE_REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(value = %raw, "Invalid NEXTMOVE_REQUEST_TIMEOUT_SECS, using default");
                    rejected.push(format!("NEXTMOVE_REQUEST_TIMEOUT_SECS='{}' is not a positive integer", raw));
                    Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
                }
            },
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let data_dir = read("NEXTMOVE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let locale = read("NEXTMOVE_LOCALE").unwrap_or_else(|| DEFAULT_LOCALE.to_string());

        debug!(
            has_base_url = api_base_url.is_some(),
            timeout_secs = request_timeout.as_secs(),
            data_dir = %data_dir.display(),
            "Environment configuration resolved"
        );

        Self {
            api_base_url,
            request_timeout,
            data_dir,
            locale,
            rejected,
        }
    }

    /// Transport settings derived from this configuration
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_base_url.clone(),
            request_timeout: self.request_timeout,
            locale: self.locale.clone(),
            ..ClientConfig::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::new();

        match self.api_base_url.as_deref() {
            None => validation.add_error(
                "NEXTMOVE_API_BASE_URL is not set - reply generation will fail",
            ),
            Some(base) => {
                if let Err(e) = url::Url::parse(base) {
                    validation.add_error(format!("NEXTMOVE_API_BASE_URL '{}' is not a valid URL: {}", base, e));
                } else if base.starts_with("http://") {
                    validation.add_warning("NEXTMOVE_API_BASE_URL uses plain http");
                }
            }
        }

        for rejected in &self.rejected {
            validation.add_warning(rejected.clone());
        }

        validation
    }
}

/// ~/.nextmove
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".nextmove")
}
