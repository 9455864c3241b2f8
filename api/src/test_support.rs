use std::sync::Arc;

use axum::response::Response;
use contextor::{AnswerPipeline, Embed, Generate, PipelineError, Retrieve};
use futures::future::BoxFuture;
use rag_store::{DocumentStore, RagError, StoreConnection};
use serde_json::Value;
use usage_stats::{StatsConfig, UsageStats};

use crate::core::app_state::{AppState, ServerSettings};

struct Canned;

impl Embed for Canned {
    fn embed<'a>(&'a self, _text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, PipelineError>> {
        Box::pin(async { Ok(vec![0.1, 0.2]) })
    }
}

impl Retrieve for Canned {
    fn retrieve(&self, _v: Vec<f32>, _k: u64) -> BoxFuture<'_, Result<Vec<String>, PipelineError>> {
        Box::pin(async { Ok(vec!["Zakbot is a chatbot.".to_string()]) })
    }
}

impl Generate for Canned {
    fn generate<'a>(&'a self, _prompt: &'a str) -> BoxFuture<'a, Result<String, PipelineError>> {
        Box::pin(async { Ok("Zakbot offers...".to_string()) })
    }
}

struct NoStore;

impl DocumentStore for NoStore {
    fn connect(&self) -> BoxFuture<'_, Result<Box<dyn StoreConnection>, RagError>> {
        Box::pin(async { Err(RagError::Closed) })
    }

    fn close(&self) -> BoxFuture<'_, ()> {
        Box::pin(async {})
    }
}

pub(crate) async fn test_state() -> (Arc<AppState>, tempfile::TempDir) {
    test_state_with(|_| {}).await
}

pub(crate) async fn test_state_with(
    tweak: impl FnOnce(&mut ServerSettings),
) -> (Arc<AppState>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let stats = UsageStats::load(StatsConfig {
        path: dir.path().join("usage_stats.json"),
        minutes_per_message: 3.0,
    })
    .await
    .unwrap();

    let canned = Arc::new(Canned);
    let pipeline = AnswerPipeline::new(canned.clone(), canned.clone(), canned);

    let mut settings = ServerSettings::default();
    tweak(&mut settings);

    let state = AppState::new(pipeline, Arc::new(stats), Arc::new(NoStore), settings);
    (Arc::new(state), dir)
}

pub(crate) async fn body_json(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
