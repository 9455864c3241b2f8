//! Default model configs loaded from environment variables.
//!
//! Two roles are used by the gateway:
//!
//! - **Chat**      → text generation (`:generateContent`)
//! - **Embedding** → query embeddings (`:embedContent`)
//!
//! # Environment variables
//!
//! - `GEMINI_API_KEY`         = API key (mandatory)
//! - `GEMINI_API_BASE`        = API base (default `https://generativelanguage.googleapis.com/v1beta`)
//! - `GEMINI_CHAT_MODEL`      = chat model (default `gemini-1.5-flash`)
//! - `GEMINI_EMBEDDING_MODEL` = embedding model (default `embedding-001`)
//! - `LLM_TIMEOUT_SECS`       = per-request timeout (default `30`)

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{AiLlmError, ConfigError, env_opt_u64, env_or, must_env, validate_http_endpoint},
};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_CHAT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_EMBEDDING_MODEL: &str = "embedding-001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Constructs the config for the **chat** model.
///
/// # Errors
/// - [`ConfigError::MissingVar`] if `GEMINI_API_KEY` is not set
/// - [`ConfigError::InvalidFormat`] if `GEMINI_API_BASE` is not http(s)
/// - [`ConfigError::InvalidNumber`] if `LLM_TIMEOUT_SECS` is not a number
pub fn config_gemini_chat() -> Result<LlmModelConfig, AiLlmError> {
    profile_from_env("GEMINI_CHAT_MODEL", DEFAULT_CHAT_MODEL)
}

/// Constructs the config for the **embedding** model.
///
/// # Errors
/// Same as [`config_gemini_chat`].
pub fn config_gemini_embedding() -> Result<LlmModelConfig, AiLlmError> {
    profile_from_env("GEMINI_EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL)
}

fn profile_from_env(model_var: &'static str, default_model: &str) -> Result<LlmModelConfig, AiLlmError> {
    let api_key = must_env("GEMINI_API_KEY")?;
    let endpoint = env_or("GEMINI_API_BASE", DEFAULT_API_BASE);
    validate_http_endpoint("GEMINI_API_BASE", &endpoint)?;

    let model = env_or(model_var, default_model);
    if model.is_empty() {
        return Err(ConfigError::EmptyModel.into());
    }

    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.or(Some(DEFAULT_TIMEOUT_SECS));

    Ok(LlmModelConfig {
        model,
        endpoint,
        api_key,
        timeout_secs,
    })
}
