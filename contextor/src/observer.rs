//! Pluggable progress hook for the answer pipeline.
//!
//! Use [`NoopObserver`] when stage-level chatter is not wanted and
//! [`TracingObserver`] to emit one event per transition.

use std::time::Duration;

use tracing::{debug, info};

use crate::error::PipelineError;
use crate::pipeline::Stage;

/// Receives state transitions of a single `answer` call.
pub trait PipelineObserver: Send + Sync {
    /// Entered a new stage.
    fn on_stage(&self, _stage: Stage) {}
    /// The run ended in `Failed`.
    fn on_failed(&self, _stage: Stage, _err: &PipelineError) {}
    /// The run reached `Done`.
    fn on_done(&self, _reply_chars: usize, _elapsed: Duration) {}
}

/// Silent observer.
#[derive(Default, Clone, Copy, Debug)]
pub struct NoopObserver;
impl PipelineObserver for NoopObserver {}

/// Emits `tracing` events for every transition.
#[derive(Default, Clone, Copy, Debug)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_stage(&self, stage: Stage) {
        debug!(?stage, "pipeline stage");
    }

    fn on_failed(&self, stage: Stage, err: &PipelineError) {
        info!(?stage, error = %err, "pipeline failed");
    }

    fn on_done(&self, reply_chars: usize, elapsed: Duration) {
        info!(
            reply_chars,
            latency_ms = elapsed.as_millis() as u64,
            "pipeline done"
        );
    }
}
