//! Configuration file watcher: tenant hot reload.
//!
//! The request pipeline treats the registry as read-only; this watcher is
//! the single writer. A changed config file is re-loaded and re-validated,
//! and only a fully valid tenant set is swapped in. An invalid file keeps
//! the current tenants serving.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{broadcast, mpsc};

use crate::config::loader::load_config;
use crate::tenancy::registry::TenantRegistry;
use crate::tenancy::tenant::Tenant;

/// Watches the configuration file and applies reloaded tenant sets to the
/// registry.
pub struct ConfigWatcher {
    path: PathBuf,
    registry: Arc<TenantRegistry>,
}

impl ConfigWatcher {
    pub fn new(path: &Path, registry: Arc<TenantRegistry>) -> Self {
        Self {
            path: path.to_path_buf(),
            registry,
        }
    }

    /// Start watching. File events arrive on a notify thread; the returned
    /// watcher handle must be kept alive for the process lifetime. The
    /// apply loop runs as a tokio task until shutdown.
    pub fn run(
        self,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<RecommendedWatcher, notify::Error> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Vec<Tenant>>();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Config file change detected, reloading...");
                        match load_config(&path) {
                            Ok(new_config) => {
                                let _ = tx.send(new_config.tenants);
                            }
                            Err(e) => {
                                tracing::error!(
                                    "Failed to reload config: {}. Keeping current tenants.",
                                    e
                                );
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;
        tracing::info!(path = ?self.path, "Config watcher started");

        let registry = self.registry;
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    update = rx.recv() => match update {
                        Some(tenants) => {
                            tracing::info!(tenants = tenants.len(), "Applying reloaded tenant set");
                            registry.replace_all(tenants);
                        }
                        None => break,
                    },
                    _ = shutdown.recv() => break,
                }
            }
        });

        Ok(watcher)
    }
}
