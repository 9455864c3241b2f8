//! The answer pipeline state machine.
//!
//! ```text
//! Embedding -> Retrieving -> Composing -> Generating -> Done
//!     |            |                          |
//!     +------------+--------> Failed <--------+
//! ```
//!
//! Stages run strictly in order; a failure short-circuits to `Failed` and no
//! later stage is invoked.

use std::sync::Arc;
use std::time::Instant;

use ai_llm_service::LlmServiceProfiles;
use rag_store::Retriever;
use tracing::{error, instrument, warn};

use crate::error::PipelineError;
use crate::observer::{NoopObserver, PipelineObserver};
use crate::prompt;
use crate::stages::{EMPTY_GENERATION_FALLBACK, Embed, Generate, Retrieve};

/// Reply returned whenever a stage fails.
pub const ERROR_FALLBACK: &str = "Something went wrong. Please contact support@zaktai.com";

/// States of a single `answer` run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Embedding,
    Retrieving,
    Composing,
    Generating,
    Done,
    Failed,
}

/// Embeds the query, retrieves context, composes the prompt, and generates
/// the reply.
///
/// Construct once and share behind an `Arc`; `answer` takes `&self` and keeps
/// no per-request state.
#[derive(Clone)]
pub struct AnswerPipeline {
    embedder: Arc<dyn Embed>,
    retriever: Arc<dyn Retrieve>,
    generator: Arc<dyn Generate>,
    observer: Arc<dyn PipelineObserver>,
    top_k: u64,
}

impl AnswerPipeline {
    pub fn new(
        embedder: Arc<dyn Embed>,
        retriever: Arc<dyn Retrieve>,
        generator: Arc<dyn Generate>,
    ) -> Self {
        Self {
            embedder,
            retriever,
            generator,
            observer: Arc::new(NoopObserver),
            top_k: 0,
        }
    }

    /// Wires the production stages: Gemini for embedding and generation,
    /// the Qdrant-backed retriever for context.
    pub fn from_services(llm: Arc<LlmServiceProfiles>, retriever: Retriever) -> Self {
        Self::new(llm.clone(), Arc::new(retriever), llm)
    }

    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Chunks requested per query; `0` defers to the retriever's default.
    pub fn with_top_k(mut self, top_k: u64) -> Self {
        self.top_k = top_k;
        self
    }

    /// Answers one user message. Never fails.
    ///
    /// Returns the generated text, [`EMPTY_GENERATION_FALLBACK`] when the model
    /// produced nothing, or [`ERROR_FALLBACK`] when any stage failed. The
    /// underlying error is logged, not returned.
    #[instrument(level = "info", skip_all, fields(message_len = message.len()))]
    pub async fn answer(&self, message: &str) -> String {
        let started = Instant::now();

        match self.run(message).await {
            Ok(reply) => {
                self.observer.on_stage(Stage::Done);
                self.observer.on_done(reply.chars().count(), started.elapsed());
                reply
            }
            Err(err) => {
                let stage = err.stage();
                error!(
                    ?stage,
                    error = %err,
                    latency_ms = started.elapsed().as_millis() as u64,
                    "answer pipeline failed"
                );
                self.observer.on_failed(stage, &err);
                self.observer.on_stage(Stage::Failed);
                ERROR_FALLBACK.to_string()
            }
        }
    }

    async fn run(&self, message: &str) -> Result<String, PipelineError> {
        self.observer.on_stage(Stage::Embedding);
        let vector = self.embedder.embed(message).await?;

        self.observer.on_stage(Stage::Retrieving);
        let chunks = self.retriever.retrieve(vector, self.top_k).await?;

        self.observer.on_stage(Stage::Composing);
        let prompt = prompt::compose(message, &chunks);

        self.observer.on_stage(Stage::Generating);
        let reply = self.generator.generate(&prompt).await?;

        if reply.trim().is_empty() {
            warn!("generator returned blank text; using fallback reply");
            return Ok(EMPTY_GENERATION_FALLBACK.to_string());
        }
        Ok(reply)
    }
}
