//! Unified error handling for `ai-llm-service`.
//!
//! A single top-level error type [`AiLlmError`] covers the whole library.
//! Configuration problems live in [`ConfigError`], upstream API problems in
//! [`ProviderError`]. Small env helpers return the unified [`Result<T>`].
//!
//! All messages carry the `[AI LLM Service]` prefix to simplify attribution in logs.

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `ai-llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Upstream API answered with something we cannot use.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Underlying HTTP transport error (connect, timeout, body read).
    #[error("[AI LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Errors raised while loading profiles from the environment.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[AI LLM Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (timeouts, limits).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_TIMEOUT_SECS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u64`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `GEMINI_API_BASE`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// Model name was empty.
    #[error("[AI LLM Service] model name must not be empty")]
    EmptyModel,
}

/* ------------------------------------------------------------------------- */
/* Provider errors                                                           */
/* ------------------------------------------------------------------------- */

/// Error reported by (or about) the upstream model API.
#[derive(Debug, Error)]
#[error("[AI LLM Service] {operation}: {kind}")]
pub struct ProviderError {
    /// Which call failed (`embedContent`, `generateContent`).
    pub operation: &'static str,
    /// What went wrong.
    pub kind: ProviderErrorKind,
}

impl ProviderError {
    pub fn new(operation: &'static str, kind: ProviderErrorKind) -> Self {
        Self { operation, kind }
    }
}

/// Detailed provider failure.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProviderErrorKind {
    /// The configured endpoint is empty or not http/https.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The API key is empty.
    #[error("missing API key")]
    MissingApiKey,

    /// Non-2xx status from upstream.
    #[error("{0}")]
    HttpStatus(HttpError),

    /// Body could not be decoded as JSON of the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// Body decoded but an expected field is absent.
    #[error("response is missing `{0}`")]
    MissingField(&'static str),
}

/// Non-successful HTTP response details kept for operator logs.
#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    /// Request URL without the API key.
    pub url: String,
    /// Short snippet of the response body (or the upstream `error.message`).
    pub snippet: String,
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {} from {}: {}", self.status, self.url, self.snippet)
    }
}

/// Maximum number of characters kept from an upstream error body.
const SNIPPET_CHARS: usize = 240;

/// Shortens an upstream body for logging.
///
/// Gemini error bodies look like `{"error":{"code":400,"message":"..."}}`;
/// when that shape is present only `error.message` is kept.
pub fn make_snippet(body: &str) -> String {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        });

    let text = message.as_deref().unwrap_or(body).trim();
    text.chars().take(SNIPPET_CHARS).collect()
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Fetches a required, non-empty environment variable.
///
/// # Errors
/// Returns [`ConfigError::MissingVar`] if the variable is absent or empty.
pub fn must_env(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ConfigError::MissingVar(name).into()),
    }
}

/// Reads an optional variable, falling back to `default` when unset or empty.
pub fn env_or(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => default.to_string(),
    }
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a valid `u64`.
pub fn env_opt_u64(name: &'static str) -> Result<Option<u64>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.trim().parse::<u64>().map(Some).map_err(|_| {
            AiLlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u64",
            })
        }),
        _ => Ok(None),
    }
}

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] otherwise.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}
