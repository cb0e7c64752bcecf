//! Learned set of address prefixes that failed validation

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::publisher::Publisher;
use crate::error::Result;
use crate::models::Prefix;
use crate::repository::BlocklistStore;

/// In-memory view of the blocklist backed by a store and a publisher
///
/// The set only grows. A prefix recorded here is skipped for the rest of the
/// run even if persisting it failed.
pub struct Blocklist {
    prefixes: HashSet<Prefix>,
    store: Arc<dyn BlocklistStore>,
    publisher: Arc<dyn Publisher>,
}

impl Blocklist {
    /// Load the persisted prefixes
    pub async fn load(
        store: Arc<dyn BlocklistStore>,
        publisher: Arc<dyn Publisher>,
    ) -> Result<Self> {
        let prefixes = store.load().await?;
        info!("Loaded {} blocklisted prefixes", prefixes.len());

        Ok(Self {
            prefixes,
            store,
            publisher,
        })
    }

    pub fn contains(&self, address: &str) -> bool {
        self.prefixes.contains(&Prefix::of(address))
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Remember the prefix of a failed address, persist it and publish
    pub async fn record(&mut self, address: &str) -> Prefix {
        let prefix = Prefix::of(address);

        match self.store.append(&prefix).await {
            Ok(()) => info!("Saved failed prefix {}", prefix),
            Err(e) => error!("Failed to persist failed prefix {}: {}", prefix, e),
        }
        self.prefixes.insert(prefix.clone());

        self.publish().await;
        prefix
    }

    /// Best-effort replication of the backing file
    pub async fn publish(&self) {
        let Some(path) = self.store.path() else {
            debug!("Blocklist store has no file to publish");
            return;
        };

        if let Err(e) = self.publisher.publish(path).await {
            warn!("Blocklist publication failed: {}", e);
        }
    }
}
