//! Blocklist replication
//!
//! Publication is advisory: failures are reported to the caller, which only
//! logs them.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

use crate::config::{PublishConfig, PublishMode};
use crate::error::{KeeperError, Result};

/// Pushes an updated file somewhere outside the process
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, file: &Path) -> Result<()>;
}

/// Publisher used when replication is turned off
#[derive(Debug, Default, Clone)]
pub struct NoopPublisher;

#[async_trait]
impl Publisher for NoopPublisher {
    async fn publish(&self, file: &Path) -> Result<()> {
        debug!(file = %file.display(), "Publishing disabled");
        Ok(())
    }
}

/// `git add` / `git commit` / `git push` in a local working tree
#[derive(Debug, Clone)]
pub struct GitPublisher {
    repo_dir: PathBuf,
    remote: String,
    branch: String,
    commit_message: String,
}

impl GitPublisher {
    pub fn new(config: &PublishConfig) -> Self {
        Self {
            repo_dir: config.repo_dir.clone(),
            remote: config.remote.clone(),
            branch: config.branch.clone(),
            commit_message: config.commit_message.clone(),
        }
    }

    async fn run_git(&self, args: &[&str]) -> std::result::Result<(), anyhow::Error> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .await?;

        if !output.status.success() {
            anyhow::bail!(
                "git {} exited with {}: {}",
                args.first().copied().unwrap_or_default(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(())
    }
}

#[async_trait]
impl Publisher for GitPublisher {
    #[instrument(skip(self, file), fields(file = %file.display()))]
    async fn publish(&self, file: &Path) -> Result<()> {
        if !self.repo_dir.join(".git").exists() {
            warn!(
                repo = %self.repo_dir.display(),
                "Not a git repository, skipping blocklist publication"
            );
            return Ok(());
        }

        let file = resolve_from_cwd(file)?;
        let file_arg = file.to_string_lossy();
        let steps: [Vec<&str>; 3] = [
            vec!["add", file_arg.as_ref()],
            vec!["commit", "-m", self.commit_message.as_str()],
            vec!["push", self.remote.as_str(), self.branch.as_str()],
        ];

        // Every step runs even if an earlier one failed.
        let mut failures = Vec::new();
        for args in &steps {
            if let Err(e) = self.run_git(args).await {
                warn!("Blocklist publication step failed: {}", e);
                failures.push(e.to_string());
            }
        }

        if failures.is_empty() {
            info!("Published blocklist to {}/{}", self.remote, self.branch);
            Ok(())
        } else {
            Err(KeeperError::Publish(failures.join("; ")))
        }
    }
}

/// Anchor a relative path to the process working directory
///
/// Git runs inside `repo_dir`, which may differ from where the file path was configured.
fn resolve_from_cwd(file: &Path) -> Result<PathBuf> {
    Ok(std::path::absolute(file)?)
}

/// Build the publisher selected by configuration
pub fn create_publisher(config: &PublishConfig) -> Box<dyn Publisher> {
    match config.mode {
        PublishMode::Git => Box::new(GitPublisher::new(config)),
        PublishMode::Disabled => Box::new(NoopPublisher),
    }
}
