//! Shared counter with JSON persistence.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::StatsConfig;
use crate::error::StatsError;
use crate::snapshot::StatsSnapshot;

/// Process-wide usage counters.
///
/// Every [`UsageStats::record`] updates memory first and then rewrites the
/// file. Persistence failures are logged; the in-memory counters stay
/// authoritative until the next successful write.
#[derive(Debug)]
pub struct UsageStats {
    cfg: StatsConfig,
    inner: Mutex<StatsSnapshot>,
}

impl UsageStats {
    /// Loads counters from `cfg.path`. A missing file starts from zero.
    ///
    /// # Errors
    /// `StatsError::Io` for unreadable files, `StatsError::Json` for corrupt
    /// ones.
    pub async fn load(cfg: StatsConfig) -> Result<Self, StatsError> {
        let mut snapshot = match fs::read(&cfg.path).await {
            Ok(bytes) => serde_json::from_slice::<StatsSnapshot>(&bytes).map_err(|source| {
                StatsError::Json {
                    path: cfg.path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %cfg.path.display(), "no stats file yet; starting from zero");
                StatsSnapshot::default()
            }
            Err(source) => {
                return Err(StatsError::Io {
                    path: cfg.path.clone(),
                    source,
                });
            }
        };
        snapshot.refresh_estimate(cfg.minutes_per_message);

        info!(
            path = %cfg.path.display(),
            total_messages = snapshot.total_messages,
            "usage stats loaded"
        );

        Ok(Self {
            cfg,
            inner: Mutex::new(snapshot),
        })
    }

    /// Counts one answered message on `channel` and persists the counters.
    pub async fn record(&self, channel: &str) {
        // Held across the write: all writers share one temp file.
        let mut guard = self.inner.lock().await;
        guard.count(channel, Utc::now(), self.cfg.minutes_per_message);

        if let Err(e) = write_atomic(&self.cfg.path, &guard).await {
            warn!(error = %e, channel, "failed to persist usage stats");
        }
    }

    /// Current counters.
    pub async fn snapshot(&self) -> StatsSnapshot {
        self.inner.lock().await.clone()
    }

    /// Writes the current counters to disk.
    ///
    /// # Errors
    /// `StatsError::Io`/`StatsError::Json` when the file cannot be written.
    pub async fn flush(&self) -> Result<(), StatsError> {
        let guard = self.inner.lock().await;
        write_atomic(&self.cfg.path, &guard).await
    }

    pub fn path(&self) -> &Path {
        &self.cfg.path
    }
}

/// Writes `snapshot` to a sibling temp file and renames it over `path`, so a
/// crash never leaves a half-written stats file.
async fn write_atomic(path: &Path, snapshot: &StatsSnapshot) -> Result<(), StatsError> {
    let io_err = |source| StatsError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).await.map_err(io_err)?;
    }

    let json = serde_json::to_vec_pretty(snapshot).map_err(|source| StatsError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = tmp_path(path);
    fs::write(&tmp, json).await.map_err(io_err)?;
    fs::rename(&tmp, path).await.map_err(io_err)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_file_sits_next_to_target() {
        assert_eq!(
            tmp_path(Path::new("data/usage_stats.json")),
            PathBuf::from("data/usage_stats.json.tmp")
        );
    }
}
