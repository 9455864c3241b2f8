//! Shared LLM service with two active profiles: `chat` and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once at startup, wrap in `Arc`, and pass clones to dependents.
//! - Each profile owns its own HTTP client (timeouts may differ per profile).
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::LlmServiceProfiles;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = Arc::new(LlmServiceProfiles::from_env()?);
//!
//! let emb = svc.embed("What services does Zakbot offer?").await?;
//! println!("Embedding dim = {}", emb.len());
//!
//! let reply = svc.generate("Say hello").await?;
//! println!("Reply = {:?}", reply);
//! # Ok(()) }
//! ```

use crate::{
    config::{
        default_config::{config_gemini_chat, config_gemini_embedding},
        llm_model_config::LlmModelConfig,
    },
    error_handler::AiLlmError,
    services::gemini_service::GeminiService,
};

/// Holds one client per logical profile.
#[derive(Debug)]
pub struct LlmServiceProfiles {
    chat: GeminiService,
    embedding: GeminiService,
}

impl LlmServiceProfiles {
    /// Creates a service from explicit profile configs.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if either client cannot be built.
    pub fn new(chat: LlmModelConfig, embedding: LlmModelConfig) -> Result<Self, AiLlmError> {
        Ok(Self {
            chat: GeminiService::new(chat)?,
            embedding: GeminiService::new(embedding)?,
        })
    }

    /// Loads both profiles from the environment (see [`crate::config::default_config`]).
    ///
    /// # Errors
    /// Returns [`AiLlmError::Config`] for missing or malformed variables.
    pub fn from_env() -> Result<Self, AiLlmError> {
        Self::new(config_gemini_chat()?, config_gemini_embedding()?)
    }

    /// Generates text with the **chat** profile. `Ok(None)` means the model
    /// answered without usable text.
    pub async fn generate(&self, prompt: &str) -> Result<Option<String>, AiLlmError> {
        self.chat.generate(prompt).await
    }

    /// Computes an embedding with the **embedding** profile.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        self.embedding.embed(input).await
    }

    /// Returns references to the current profiles `(chat, embedding)`.
    pub fn profiles(&self) -> (&LlmModelConfig, &LlmModelConfig) {
        (self.chat.config(), self.embedding.config())
    }
}
