//! Route file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::RouterConfig;
use crate::observability::metrics;
use crate::routing::tree::RouteTable;

/// A watcher that monitors the route file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<RouterConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for validated configurations.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RouterConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. The returned watcher must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    tracing::info!(path = %path.display(), "Route file change detected, reloading");
                    match load_config(&path) {
                        Ok(config) => {
                            let _ = tx.send(config);
                        }
                        Err(e) => {
                            metrics::record_config_reload("rejected");
                            tracing::error!(error = %e, "Route file reload failed, keeping current routes");
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %self.path.display(), "Route file watcher started");
        Ok(watcher)
    }
}

/// Publish the routes of a reloaded configuration.
///
/// Returns false, leaving the table untouched, if the routes are invalid.
pub fn apply_reload(table: &RouteTable<String>, config: &RouterConfig) -> bool {
    match config.route_tree() {
        Ok(tree) => {
            let nodes = tree.node_count();
            table.swap(tree);
            metrics::record_config_reload("applied");
            tracing::info!(nodes, "Reloaded routes applied");
            true
        }
        Err(e) => {
            metrics::record_config_reload("rejected");
            tracing::warn!(error = %e, "Reloaded routes rejected");
            false
        }
    }
}
