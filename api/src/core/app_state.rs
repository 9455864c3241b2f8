use std::sync::Arc;

use ai_llm_service::{AiLlmError, LlmServiceProfiles};
use contextor::{AnswerPipeline, TracingObserver};
use rag_store::{DocumentStore, QdrantStore, RagConfig, RagError, Retriever};
use thiserror::Error;
use tracing::{info, warn};
use usage_stats::{StatsConfig, StatsError, UsageStats};

use crate::core::channels::InboundMessage;

/// Startup configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error(transparent)]
    Llm(#[from] AiLlmError),

    #[error(transparent)]
    Rag(#[from] RagError),

    #[error(transparent)]
    Stats(#[from] StatsError),
}

/// HTTP-level settings read from the environment.
#[derive(Clone, Debug, PartialEq)]
pub struct ServerSettings {
    /// `API_ADDRESS`, or `0.0.0.0:$PORT` (port defaults to 3000).
    pub address: String,
    /// `ENVIRONMENT`, default `local`; startup logging only.
    pub environment: String,
    /// `PUBLIC_URL`; startup logging only.
    pub public_url: Option<String>,
    /// `MESSENGER_VERIFY_TOKEN`; without it every handshake is refused.
    pub messenger_verify_token: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: "0.0.0.0:3000".into(),
            environment: "local".into(),
            public_url: None,
            messenger_verify_token: None,
        }
    }
}

impl ServerSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let address = match var("API_ADDRESS") {
            Some(addr) => addr,
            None => {
                let port = match var("PORT") {
                    Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                        var: "PORT",
                        reason: e.to_string(),
                    })?,
                    None => 3000,
                };
                format!("0.0.0.0:{port}")
            }
        };

        Ok(Self {
            address,
            environment: var("ENVIRONMENT").unwrap_or_else(|| "local".into()),
            public_url: var("PUBLIC_URL"),
            messenger_verify_token: var("MESSENGER_VERIFY_TOKEN"),
        })
    }
}

/// Shared state for all HTTP handlers.
pub struct AppState {
    pub pipeline: AnswerPipeline,
    pub stats: Arc<UsageStats>,
    /// Store handle owned by the process; closed after the server stops.
    pub store: Arc<dyn DocumentStore>,
    pub settings: ServerSettings,
}

impl AppState {
    pub fn new(
        pipeline: AnswerPipeline,
        stats: Arc<UsageStats>,
        store: Arc<dyn DocumentStore>,
        settings: ServerSettings,
    ) -> Self {
        Self {
            pipeline,
            stats,
            store,
            settings,
        }
    }

    /// Builds every service from environment variables.
    ///
    /// # Errors
    /// Any missing or malformed variable, an invalid store configuration, or
    /// an unreadable stats file.
    pub async fn from_env() -> Result<Self, ConfigError> {
        let settings = ServerSettings::from_env()?;

        let llm = Arc::new(LlmServiceProfiles::from_env()?);
        let (chat, embedding) = llm.profiles();
        info!(
            chat_model = %chat.model,
            embedding_model = %embedding.model,
            "LLM profiles loaded"
        );

        let rag_cfg = RagConfig::from_env()?;
        let store: Arc<dyn DocumentStore> = Arc::new(QdrantStore::new(rag_cfg.clone())?);
        let retriever = Retriever::new(store.clone(), rag_cfg);

        let pipeline =
            AnswerPipeline::from_services(llm, retriever).with_observer(Arc::new(TracingObserver));

        let stats = Arc::new(UsageStats::load(StatsConfig::from_env()?).await?);

        Ok(Self::new(pipeline, stats, store, settings))
    }

    /// Runs the pipeline for one inbound message and counts it.
    pub async fn answer(&self, inbound: &InboundMessage) -> String {
        let reply = self.pipeline.answer(inbound.text()).await;
        self.stats.record(inbound.channel().as_str()).await;
        reply
    }

    /// Releases the store handle and persists the counters.
    pub async fn shutdown(&self) {
        self.store.close().await;
        match self.stats.flush().await {
            Ok(()) => info!(path = %self.stats.path().display(), "usage stats flushed"),
            Err(e) => warn!(error = %e, "failed to flush usage stats"),
        }
    }
}

fn var(k: &str) -> Option<String> {
    std::env::var(k)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
