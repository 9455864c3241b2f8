//! Retrieval-augmented answer pipeline.
//!
//! Public API: [`AnswerPipeline::answer`]. It embeds the user message,
//! retrieves the nearest chunks from `rag-store`, composes a persona prompt
//! around them, calls the hosted model, and returns the reply text. Failures
//! never escape: they are logged and replaced by [`ERROR_FALLBACK`].

mod error;
pub mod observer;
pub mod pipeline;
pub mod prompt;
pub mod stages;

pub use error::PipelineError;
pub use observer::{NoopObserver, PipelineObserver, TracingObserver};
pub use pipeline::{AnswerPipeline, ERROR_FALLBACK, Stage};
pub use stages::{EMPTY_GENERATION_FALLBACK, Embed, Generate, Retrieve};
