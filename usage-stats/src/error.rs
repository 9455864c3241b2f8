use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("invalid stats config: {0}")]
    Config(String),

    #[error("stats file I/O at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stats file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
