use async_trait::async_trait;
use parking_lot::Mutex;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

use crate::error::Result;
use crate::models::{RunState, StateFile};

/// Durable snapshot of a run
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Last saved state, or `None` when there is nothing to resume
    async fn load(&self) -> Result<Option<RunState>>;

    /// Replace the saved state
    async fn save(&self, state: &RunState) -> Result<()>;
}

/// JSON file rewritten in full on every save
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn load(&self) -> Result<Option<RunState>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No state file, fresh start");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let file: StateFile = serde_json::from_slice(&raw)?;
        file.into_run_state()
    }

    async fn save(&self, state: &RunState) -> Result<()> {
        let body = serde_json::to_vec(&StateFile::from(state))?;

        // Write beside the target and rename so a crash never leaves half a file.
        let staging = self.staging_path();
        tokio::fs::write(&staging, &body).await?;
        tokio::fs::rename(&staging, &self.path).await?;

        debug!(path = %self.path.display(), remaining = state.remaining_demand, "Saved run state");
        Ok(())
    }
}

/// In-memory store recording every save
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    saves: Mutex<Vec<RunState>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that resumes from `state`
    pub fn with_state(state: RunState) -> Self {
        Self {
            saves: Mutex::new(vec![state]),
        }
    }

    /// Every state saved so far (including the seeded one)
    pub fn history(&self) -> Vec<RunState> {
        self.saves.lock().clone()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn load(&self) -> Result<Option<RunState>> {
        Ok(self.saves.lock().last().cloned())
    }

    async fn save(&self, state: &RunState) -> Result<()> {
        self.saves.lock().push(state.clone());
        Ok(())
    }
}
