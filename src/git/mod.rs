//! Read-only git queries
//!
//! [`GitQuery`] is the narrow interface the hook needs from version control.
//! [`GitCli`] implements it by shelling out to the `git` executable, one
//! subprocess per query, each bounded by a timeout.

pub mod status;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

pub use status::{StatusFilter, StatusLine};

/// Branch names tried, in order, when looking for the integration branch
pub const MAIN_BRANCH_CANDIDATES: [&str; 2] = ["main", "master"];

/// Errors from a single git query
#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to spawn git: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("git {command} timed out after {timeout_ms}ms")]
    Timeout { command: String, timeout_ms: u128 },
    #[error("git {command} exited with code {code}: {stderr}")]
    Failed {
        command: String,
        code: i32,
        stderr: String,
    },
    #[error("git {0} produced non-UTF-8 output")]
    InvalidUtf8(String),
}

/// Read-only view of a repository
#[async_trait]
pub trait GitQuery: Send + Sync {
    /// Whether the working directory is inside a repository
    async fn is_repository(&self) -> bool;

    /// Current branch name, `None` on a detached HEAD
    async fn current_branch(&self) -> Result<Option<String>, GitError>;

    /// First of [`MAIN_BRANCH_CANDIDATES`] that exists
    async fn main_branch(&self) -> Result<Option<String>, GitError>;

    /// `git status --short` lines, empty for a clean tree
    async fn status(&self) -> Result<Vec<String>, GitError>;

    /// Up to `count` commits as `<short-hash> <subject>`, newest first
    async fn recent_commits(&self, count: usize) -> Result<Vec<String>, GitError>;
}

/// [`GitQuery`] backed by the `git` command line
#[derive(Debug, Clone)]
pub struct GitCli {
    working_dir: PathBuf,
    timeout: Duration,
}

impl GitCli {
    /// Create a new git client rooted at `working_dir`
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            timeout: Duration::from_secs(2),
        }
    }

    /// Set the per-query timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Run `git <args>` and return stdout with trailing whitespace removed
    async fn run_git(&self, args: &[&str]) -> Result<String, GitError> {
        let command = args.join(" ");
        tracing::debug!("Running git {} in {}", command, self.working_dir.display());

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.working_dir)
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GIT_OPTIONAL_LOCKS", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, output).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(GitError::Timeout {
                    command,
                    timeout_ms: self.timeout.as_millis(),
                })
            }
        };

        if !output.status.success() {
            return Err(GitError::Failed {
                command,
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| GitError::InvalidUtf8(command))?;
        Ok(stdout.trim_end().to_string())
    }
}

#[async_trait]
impl GitQuery for GitCli {
    async fn is_repository(&self) -> bool {
        self.run_git(&["rev-parse", "--git-dir"]).await.is_ok()
    }

    async fn current_branch(&self) -> Result<Option<String>, GitError> {
        let branch = self.run_git(&["branch", "--show-current"]).await?;
        let branch = branch.trim();
        Ok((!branch.is_empty()).then(|| branch.to_string()))
    }

    async fn main_branch(&self) -> Result<Option<String>, GitError> {
        for candidate in MAIN_BRANCH_CANDIDATES {
            let reference = format!("refs/heads/{}", candidate);
            match self
                .run_git(&["rev-parse", "--verify", "--quiet", reference.as_str()])
                .await
            {
                Ok(_) => return Ok(Some(candidate.to_string())),
                Err(GitError::Failed { .. }) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }

    async fn status(&self) -> Result<Vec<String>, GitError> {
        let output = self.run_git(&["status", "--short"]).await?;
        Ok(output
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(String::from)
            .collect())
    }

    async fn recent_commits(&self, count: usize) -> Result<Vec<String>, GitError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let limit = format!("-n{}", count);
        let output = self
            .run_git(&["log", "--no-color", "--format=%h %s", limit.as_str()])
            .await?;
        Ok(output.lines().map(String::from).collect())
    }
}
