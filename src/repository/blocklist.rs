use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::Result;
use crate::models::Prefix;

/// Durable storage for failed prefixes
#[async_trait]
pub trait BlocklistStore: Send + Sync {
    /// Read every stored prefix; a missing store is an empty set
    async fn load(&self) -> Result<HashSet<Prefix>>;

    /// Append one prefix; duplicates are allowed in storage
    async fn append(&self, prefix: &Prefix) -> Result<()>;

    /// File to hand to a publisher, if the store is file-backed
    fn path(&self) -> Option<&Path> {
        None
    }
}

/// Newline-delimited text file, one prefix per line
#[derive(Debug, Clone)]
pub struct FileBlocklistStore {
    path: PathBuf,
}

impl FileBlocklistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl BlocklistStore for FileBlocklistStore {
    async fn load(&self) -> Result<HashSet<Prefix>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No blocklist file, starting empty");
                return Ok(HashSet::new());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(contents.lines().filter_map(Prefix::from_stored).collect())
    }

    async fn append(&self, prefix: &Prefix) -> Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{}\n", prefix).as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// In-memory store keeping the raw append log, duplicates included
#[derive(Debug, Default)]
pub struct MemoryBlocklistStore {
    lines: Mutex<Vec<Prefix>>,
}

impl MemoryBlocklistStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            lines: Mutex::new(
                prefixes
                    .into_iter()
                    .filter_map(|p| Prefix::from_stored(p.as_ref()))
                    .collect(),
            ),
        }
    }

    /// Everything appended so far, in order
    pub fn lines(&self) -> Vec<Prefix> {
        self.lines.lock().clone()
    }
}

#[async_trait]
impl BlocklistStore for MemoryBlocklistStore {
    async fn load(&self) -> Result<HashSet<Prefix>> {
        Ok(self.lines.lock().iter().cloned().collect())
    }

    async fn append(&self, prefix: &Prefix) -> Result<()> {
        self.lines.lock().push(prefix.clone());
        Ok(())
    }
}
