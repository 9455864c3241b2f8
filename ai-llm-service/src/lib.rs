//! Shared client for the hosted language model used by the gateway.
//!
//! - [`services::gemini_service::GeminiService`] talks to the Gemini REST API
//!   (`:embedContent` and `:generateContent`).
//! - [`service_profiles::LlmServiceProfiles`] bundles the chat and embedding
//!   profiles so the application constructs them once and shares an `Arc`.
//! - [`error_handler`] holds the unified [`AiLlmError`] type.
//! - [`telemetry`] builds the `tracing-subscriber` layers used by the binaries.

pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;
pub mod telemetry;

pub use config::llm_model_config::LlmModelConfig;
pub use error_handler::AiLlmError;
pub use service_profiles::LlmServiceProfiles;
pub use services::gemini_service::GeminiService;
