//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! All Qdrant interactions live behind [`QdrantStore`] (the long-lived handle)
//! and [`QdrantConnection`] (one acquired connection), keeping the rest of the
//! gateway decoupled from `qdrant-client` builders.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::BoxFuture;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{SearchParamsBuilder, SearchPointsBuilder, Value as QValue};
use tracing::{debug, info, warn};

use crate::config::{ConnectionMode, RagConfig};
use crate::errors::RagError;
use crate::record::{RagHit, VectorSearch};
use crate::store::{DocumentStore, StoreConnection};

/// Qdrant-backed [`DocumentStore`].
///
/// In [`ConnectionMode::PerCall`] every `connect` builds a new client and
/// probes it with a health check, so an unreachable store fails the search
/// up front. In [`ConnectionMode::Shared`] one client is built here and each
/// connection is a cheap handle to it.
pub struct QdrantStore {
    cfg: RagConfig,
    shared: Mutex<Option<Arc<Qdrant>>>,
    closed: AtomicBool,
}

impl QdrantStore {
    /// Creates the store handle from the given configuration.
    ///
    /// # Errors
    /// Returns `RagError::Config` for invalid settings, or
    /// `RagError::Connection` if the shared client cannot be built.
    pub fn new(cfg: RagConfig) -> Result<Self, RagError> {
        cfg.validate()?;

        let shared = match cfg.connection_mode {
            ConnectionMode::Shared => Some(Arc::new(build_client(&cfg)?)),
            ConnectionMode::PerCall => None,
        };

        info!(
            url = %cfg.qdrant_url,
            collection = %cfg.collection,
            mode = ?cfg.connection_mode,
            "QdrantStore initialized"
        );

        Ok(Self {
            cfg,
            shared: Mutex::new(shared),
            closed: AtomicBool::new(false),
        })
    }

    async fn open(&self) -> Result<Arc<Qdrant>, RagError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(RagError::Closed);
        }

        match self.cfg.connection_mode {
            ConnectionMode::Shared => self.shared_client(),
            ConnectionMode::PerCall => {
                let client = build_client(&self.cfg)?;
                client
                    .health_check()
                    .await
                    .map_err(|e| RagError::Connection(e.to_string()))?;
                debug!(url = %self.cfg.qdrant_url, "qdrant connection opened");
                Ok(Arc::new(client))
            }
        }
    }

    fn shared_client(&self) -> Result<Arc<Qdrant>, RagError> {
        self.shared
            .lock()
            .map_err(|_| RagError::Connection("shared client lock poisoned".into()))?
            .clone()
            .ok_or(RagError::Closed)
    }
}

impl DocumentStore for QdrantStore {
    fn connect(&self) -> BoxFuture<'_, Result<Box<dyn StoreConnection>, RagError>> {
        Box::pin(async move {
            let client = self.open().await?;
            Ok(Box::new(QdrantConnection { client }) as Box<dyn StoreConnection>)
        })
    }

    fn close(&self) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            self.closed.store(true, Ordering::Release);
            match self.shared.lock() {
                Ok(mut guard) => {
                    guard.take();
                }
                Err(_) => warn!("shared client lock poisoned during close"),
            }
            info!(collection = %self.cfg.collection, "QdrantStore closed");
        })
    }
}

/// One acquired Qdrant connection.
pub struct QdrantConnection {
    client: Arc<Qdrant>,
}

impl StoreConnection for QdrantConnection {
    fn vector_search<'a>(
        &'a self,
        search: &'a VectorSearch,
    ) -> BoxFuture<'a, Result<Vec<RagHit>, RagError>> {
        Box::pin(async move {
            debug!(
                collection = %search.index,
                limit = search.limit,
                num_candidates = search.num_candidates,
                exact = search.exact,
                "qdrant search"
            );

            let mut builder = SearchPointsBuilder::new(
                search.index.as_str(),
                search.query_vector.clone(),
                search.limit,
            )
            .with_payload(true)
            .params(
                SearchParamsBuilder::default()
                    .hnsw_ef(search.num_candidates)
                    .exact(search.exact),
            );

            if let Some(name) = &search.path {
                builder = builder.vector_name(name.as_str());
            }

            let res = self
                .client
                .search_points(builder)
                .await
                .map_err(|e| RagError::Qdrant(e.to_string()))?;

            let hits: Vec<RagHit> = res
                .result
                .into_iter()
                .map(|point| RagHit {
                    score: point.score,
                    text: payload_text(point.payload.get(&search.text_field)),
                })
                .collect();

            debug!(hits = hits.len(), "qdrant search completed");
            Ok(hits)
        })
    }

    fn close(self: Box<Self>) -> BoxFuture<'static, ()> {
        Box::pin(async move {
            // Dropping the last Arc tears down the channel pool of a per-call client.
            drop(self.client);
            debug!("qdrant connection closed");
        })
    }
}

fn build_client(cfg: &RagConfig) -> Result<Qdrant, RagError> {
    let mut builder = Qdrant::from_url(&cfg.qdrant_url)
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .skip_compatibility_check();
    if let Some(key) = &cfg.qdrant_api_key {
        builder = builder.api_key(key.clone());
    }
    builder
        .build()
        .map_err(|e| RagError::Connection(e.to_string()))
}

/// Chunk text from a payload value; anything but a string maps to `""`.
fn payload_text(v: Option<&QValue>) -> String {
    use qdrant_client::qdrant::value::Kind as K;
    match v.and_then(|v| v.kind.as_ref()) {
        Some(K::StringValue(s)) => s.clone(),
        _ => String::new(),
    }
}
