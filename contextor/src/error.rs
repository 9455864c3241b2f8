//! Typed error for the contextor crate.

use thiserror::Error;

use crate::pipeline::Stage;

/// Hard failure of one pipeline stage.
///
/// The pipeline never surfaces these to callers; they are logged and turned
/// into the fixed fallback reply.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("embedding failed: {0}")]
    Embedding(String),

    #[error("retrieval failed: {0}")]
    Retrieval(String),

    #[error("generation failed: {0}")]
    Generation(String),
}

impl PipelineError {
    /// Stage that was running when the error occurred.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Embedding(_) => Stage::Embedding,
            Self::Retrieval(_) => Stage::Retrieving,
            Self::Generation(_) => Stage::Generating,
        }
    }
}

impl From<rag_store::RagError> for PipelineError {
    fn from(e: rag_store::RagError) -> Self {
        Self::Retrieval(e.to_string())
    }
}
