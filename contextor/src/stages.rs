//! Stage seams of the answer pipeline and their production adapters.
//!
//! Each stage is a small object-safe trait returning a boxed future, so the
//! pipeline can hold `Arc<dyn ...>` and tests can swap in stubs.

use ai_llm_service::LlmServiceProfiles;
use futures::future::BoxFuture;
use rag_store::Retriever;
use tracing::warn;

use crate::error::PipelineError;

/// Reply used when the model answers without any text.
pub const EMPTY_GENERATION_FALLBACK: &str =
    "Sorry, I couldn't generate a reply. Please contact support.";

/// Turns the user query into an embedding vector.
pub trait Embed: Send + Sync {
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, PipelineError>>;
}

/// Fetches up to `top_k` chunk texts nearest to `vector`, best first.
/// `top_k = 0` means "use the configured default".
pub trait Retrieve: Send + Sync {
    fn retrieve(
        &self,
        vector: Vec<f32>,
        top_k: u64,
    ) -> BoxFuture<'_, Result<Vec<String>, PipelineError>>;
}

/// Produces the reply text for a composed prompt.
pub trait Generate: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, PipelineError>>;
}

impl Embed for LlmServiceProfiles {
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, PipelineError>> {
        Box::pin(async move {
            LlmServiceProfiles::embed(self, text)
                .await
                .map_err(|e| PipelineError::Embedding(e.to_string()))
        })
    }
}

impl Generate for LlmServiceProfiles {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, PipelineError>> {
        Box::pin(async move {
            match LlmServiceProfiles::generate(self, prompt).await {
                Ok(Some(text)) => Ok(text),
                Ok(None) => {
                    warn!("model returned no text; using fallback reply");
                    Ok(EMPTY_GENERATION_FALLBACK.to_string())
                }
                Err(e) => Err(PipelineError::Generation(e.to_string())),
            }
        })
    }
}

impl Retrieve for Retriever {
    fn retrieve(
        &self,
        vector: Vec<f32>,
        top_k: u64,
    ) -> BoxFuture<'_, Result<Vec<String>, PipelineError>> {
        Box::pin(async move { Ok(self.search(vector, top_k).await?) })
    }
}
