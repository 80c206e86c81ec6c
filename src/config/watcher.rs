//! Hot reload of the configuration file.
//!
//! The parent directory is watched rather than the file itself, so editors
//! that save by renaming a temporary file over the original still trigger a
//! reload. Rejected files are logged and the running configuration stays.

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::GatewayConfig;

pub struct ConfigWatcher {
    file: PathBuf,
    updates: mpsc::UnboundedSender<GatewayConfig>,
}

impl ConfigWatcher {
    /// The receiver yields every successfully reloaded configuration.
    pub fn new(file: &Path) -> (Self, mpsc::UnboundedReceiver<GatewayConfig>) {
        let (updates, rx) = mpsc::unbounded_channel();
        let watcher = Self {
            file: file.to_path_buf(),
            updates,
        };
        (watcher, rx)
    }

    fn concerns_file(&self, event: &Event) -> bool {
        let relevant_kind = matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_));
        let file_name = self.file.file_name();
        relevant_kind && event.paths.iter().any(|p| p.file_name() == file_name)
    }

    fn reload(&self) {
        match load_config(&self.file) {
            Ok(config) => {
                tracing::info!(path = %self.file.display(), "Configuration file reloaded");
                if self.updates.send(config).is_err() {
                    tracing::debug!("Nobody is listening for configuration updates");
                }
            }
            Err(e) => tracing::error!(
                path = %self.file.display(),
                error = %e,
                "Rejected configuration change, keeping current configuration"
            ),
        }
    }

    /// Start watching. Watching stops when the returned handle is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let directory = match self.file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut handle = RecommendedWatcher::new(
            move |result: notify::Result<Event>| match result {
                Ok(event) if self.concerns_file(&event) => self.reload(),
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "Configuration watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;
        handle.watch(&directory, RecursiveMode::NonRecursive)?;

        tracing::info!(directory = %directory.display(), "Watching configuration for changes");
        Ok(handle)
    }
}
