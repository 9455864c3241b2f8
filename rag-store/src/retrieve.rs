//! Scoped vector search: connect, query, release.

use std::sync::Arc;

use tracing::{debug, error, instrument};

use crate::config::RagConfig;
use crate::errors::RagError;
use crate::record::VectorSearch;
use crate::store::DocumentStore;

/// Runs nearest-neighbour searches against an injected [`DocumentStore`].
#[derive(Clone)]
pub struct Retriever {
    store: Arc<dyn DocumentStore>,
    cfg: RagConfig,
}

impl Retriever {
    pub fn new(store: Arc<dyn DocumentStore>, cfg: RagConfig) -> Self {
        Self { store, cfg }
    }

    /// Number of chunks returned when the caller passes `top_k = 0`.
    pub fn default_top_k(&self) -> u64 {
        self.cfg.top_k
    }

    /// Returns the text of at most `top_k` nearest chunks, in store order.
    ///
    /// A connection is acquired for this call only and released before
    /// returning, whether the query succeeded or not.
    ///
    /// # Errors
    /// `RagError::Connection`/`RagError::Closed` if no connection could be
    /// acquired, `RagError::Qdrant` if the query itself failed.
    #[instrument(level = "debug", skip(self, vector), fields(dims = vector.len()))]
    pub async fn search(&self, vector: Vec<f32>, top_k: u64) -> Result<Vec<String>, RagError> {
        let limit = if top_k == 0 { self.cfg.top_k } else { top_k };
        let search = VectorSearch {
            query_vector: vector,
            path: self.cfg.vector_name.clone(),
            num_candidates: self.cfg.num_candidates.max(limit),
            limit,
            index: self.cfg.collection.clone(),
            text_field: self.cfg.text_field.clone(),
            exact: self.cfg.exact_search,
        };

        let conn = self.store.connect().await.map_err(|e| {
            error!(error = %e, "document store connection failed");
            e
        })?;

        let result = conn.vector_search(&search).await;
        conn.close().await;

        match result {
            Ok(hits) => {
                let texts: Vec<String> = hits
                    .into_iter()
                    .take(limit as usize)
                    .map(|h| h.text)
                    .collect();
                debug!(returned = texts.len(), limit, "vector search done");
                Ok(texts)
            }
            Err(e) => {
                error!(error = %e, "vector search failed");
                Err(e)
            }
        }
    }
}
