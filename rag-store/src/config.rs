//! Runtime and retrieval configuration.

use std::str::FromStr;

use crate::errors::RagError;

/// How the store hands out connections to [`crate::Retriever::search`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ConnectionMode {
    /// Build a fresh client and probe it on every search; drop it afterwards.
    #[default]
    PerCall,
    /// Build one client at startup; each search borrows a handle to it.
    Shared,
}

impl FromStr for ConnectionMode {
    type Err = RagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per_call" | "per-call" | "percall" => Ok(Self::PerCall),
            "shared" | "pooled" => Ok(Self::Shared),
            other => Err(RagError::Config(format!(
                "unknown connection mode `{other}` (expected `per_call` or `shared`)"
            ))),
        }
    }
}

/// Configuration for retrieval against a Qdrant collection.
#[derive(Clone, Debug)]
pub struct RagConfig {
    /// Qdrant gRPC endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Collection holding the chunk points (the named vector index).
    pub collection: String,
    /// Named vector holding chunk embeddings; `None` uses the default vector.
    pub vector_name: Option<String>,
    /// Payload field carrying the chunk text.
    pub text_field: String,
    /// Client request timeout in seconds.
    pub timeout_secs: u64,
    /// Default number of chunks returned per search.
    pub top_k: u64,
    /// Candidates examined by the ANN search (`hnsw_ef`).
    pub num_candidates: u64,
    /// Exact search flag (false = HNSW ANN).
    pub exact_search: bool,
    /// Connection discipline.
    pub connection_mode: ConnectionMode,
}

impl RagConfig {
    /// Creates a default config for a given Qdrant endpoint and collection.
    pub fn new_default(url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            qdrant_url: url.into(),
            qdrant_api_key: None,
            collection: collection.into(),
            vector_name: None,
            text_field: "text".into(),
            timeout_secs: 10,
            top_k: 5,
            num_candidates: 100,
            exact_search: false,
            connection_mode: ConnectionMode::PerCall,
        }
    }

    /// Builds a config from environment variables with defaults.
    ///
    /// | Var | Default |
    /// |-----|---------|
    /// | `QDRANT_URL` | `http://127.0.0.1:6334` |
    /// | `QDRANT_API_KEY` | unset |
    /// | `QDRANT_COLLECTION` | `vector_index` |
    /// | `QDRANT_VECTOR_NAME` | unset |
    /// | `QDRANT_TEXT_FIELD` | `text` |
    /// | `QDRANT_TIMEOUT_SECS` | `10` |
    /// | `RAG_TOP_K` | `5` |
    /// | `RAG_NUM_CANDIDATES` | `100` |
    /// | `RAG_EXACT_SEARCH` | `false` |
    /// | `RAG_CONNECTION_MODE` | `per_call` |
    ///
    /// # Errors
    /// Returns `RagError::Config` for unparsable numbers, an unknown mode, or
    /// values rejected by [`RagConfig::validate`].
    pub fn from_env() -> Result<Self, RagError> {
        let mut cfg = Self::new_default(
            env("QDRANT_URL", "http://127.0.0.1:6334"),
            env("QDRANT_COLLECTION", "vector_index"),
        );

        cfg.qdrant_api_key = opt_env("QDRANT_API_KEY");
        cfg.vector_name = opt_env("QDRANT_VECTOR_NAME");
        cfg.text_field = env("QDRANT_TEXT_FIELD", "text");
        cfg.timeout_secs = parse("QDRANT_TIMEOUT_SECS", cfg.timeout_secs)?;
        cfg.top_k = parse("RAG_TOP_K", cfg.top_k)?;
        cfg.num_candidates = parse("RAG_NUM_CANDIDATES", cfg.num_candidates)?;
        cfg.exact_search = parse("RAG_EXACT_SEARCH", cfg.exact_search)?;
        cfg.connection_mode = match opt_env("RAG_CONNECTION_MODE") {
            Some(raw) => raw.parse()?,
            None => ConnectionMode::PerCall,
        };

        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), RagError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(RagError::Config("qdrant_url is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(RagError::Config("collection is empty".into()));
        }
        if self.text_field.trim().is_empty() {
            return Err(RagError::Config("text_field is empty".into()));
        }
        if self.top_k == 0 {
            return Err(RagError::Config("top_k must be > 0".into()));
        }
        if self.num_candidates < self.top_k {
            return Err(RagError::Config(format!(
                "num_candidates ({}) must be >= top_k ({})",
                self.num_candidates, self.top_k
            )));
        }
        Ok(())
    }
}

fn env(k: &str, dflt: &str) -> String {
    opt_env(k).unwrap_or_else(|| dflt.to_string())
}

fn opt_env(k: &str) -> Option<String> {
    std::env::var(k)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse<T: FromStr>(k: &str, dflt: T) -> Result<T, RagError> {
    match opt_env(k) {
        Some(v) => v
            .parse()
            .map_err(|_| RagError::Config(format!("{k} has an invalid value `{v}`"))),
        None => Ok(dflt),
    }
}
