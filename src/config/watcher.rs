//! Configuration file watcher for hot reload.

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::AppConfig;
use crate::logging;

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<AppConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<AppConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        logging::info(&["config file change detected, reloading"]);
                        match load_config(&path) {
                            Ok(new_config) => {
                                let _ = tx.send(new_config);
                            }
                            Err(e) => {
                                crate::errorf!("failed to reload config, keeping current: {}", e);
                            }
                        }
                    }
                }
                Err(e) => {
                    crate::errorf!("config watch error: {}", e);
                }
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        crate::infof!("config watcher started on {}", self.path.display());
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_reload_on_change() {
        let path = std::env::temp_dir().join(format!("applog-watch-{}.toml", std::process::id()));
        fs::write(&path, "[logging]\nverbose = false\n").unwrap();

        let (watcher, mut updates) = ConfigWatcher::new(&path);
        let handle = watcher.run().unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        fs::write(&path, "[logging]\nverbose = true\n").unwrap();

        // truncation can surface as its own event, so skip partial reads
        let reloaded = tokio::time::timeout(Duration::from_secs(10), async {
            while let Some(config) = updates.recv().await {
                if config.logging.verbose {
                    return true;
                }
            }
            false
        })
        .await
        .expect("no reload within timeout");
        assert!(reloaded);

        drop(handle);
        fs::remove_file(path).unwrap_or_default();
    }
}
