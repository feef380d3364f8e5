//! Context providers for the status injection
//!
//! Each provider renders one section of the injected text, or nothing.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::clock::Clock;
use crate::config::StatusContextConfig;
use crate::git::{GitQuery, StatusFilter};

/// Header of the git block
pub const GIT_SNAPSHOT_HEADER: &str = "gitStatus: This is the git status at the start of the conversation. Note that this status is a snapshot in time, and will not update during the conversation.";

/// Trait for context providers
///
/// Context providers generate a section of text that is injected into
/// the conversation before each prompt.
#[async_trait]
pub trait ContextProvider: Send + Sync {
    /// Get the name of this context provider
    fn name(&self) -> &str;

    /// Render this provider's section
    ///
    /// Returns None if the section should be left out.
    async fn get_context(&self) -> Result<Option<String>>;
}

/// Provider for the current date and time
pub struct DatetimeProvider {
    clock: Arc<dyn Clock>,
    include_timezone: bool,
}

impl DatetimeProvider {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            include_timezone: false,
        }
    }

    /// Append the timezone abbreviation to the timestamp
    pub fn with_timezone(mut self, include: bool) -> Self {
        self.include_timezone = include;
        self
    }
}

#[async_trait]
impl ContextProvider for DatetimeProvider {
    fn name(&self) -> &str {
        "datetime"
    }

    async fn get_context(&self) -> Result<Option<String>> {
        let now = self.clock.now()?;
        Ok(Some(format!(
            "Today's date: {}",
            now.render(self.include_timezone)
        )))
    }
}

/// Which git sub-sections to render
#[derive(Debug, Clone)]
pub struct GitSections {
    pub branch: bool,
    pub main_branch: bool,
    pub status: bool,
    pub commits: usize,
}

impl GitSections {
    pub fn from_config(config: &StatusContextConfig) -> Self {
        Self {
            branch: config.git_include_branch,
            main_branch: config.git_include_main_branch,
            status: config.git_include_status,
            commits: config.git_include_commits,
        }
    }

    fn any(&self) -> bool {
        self.branch || self.main_branch || self.status || self.commits > 0
    }
}

/// Provider for git repository context
///
/// Provides current branch, main branch, working-tree status and recent
/// commits. A failed query drops only its own sub-section.
pub struct GitStatusProvider {
    git: Arc<dyn GitQuery>,
    sections: GitSections,
    filter: StatusFilter,
}

impl GitStatusProvider {
    /// Create a new git status provider
    pub fn new(git: Arc<dyn GitQuery>, sections: GitSections, filter: StatusFilter) -> Self {
        Self {
            git,
            sections,
            filter,
        }
    }

    pub fn from_config(git: Arc<dyn GitQuery>, config: &StatusContextConfig) -> Self {
        Self::new(
            git,
            GitSections::from_config(config),
            StatusFilter::from_config(config),
        )
    }

    async fn branch_block(&self) -> Option<String> {
        match self.git.current_branch().await {
            Ok(Some(branch)) => Some(format!("Current branch: {}", branch)),
            Ok(None) => {
                tracing::debug!("Detached HEAD, omitting current branch");
                None
            }
            Err(e) => {
                tracing::debug!("Omitting current branch: {}", e);
                None
            }
        }
    }

    async fn main_branch_block(&self) -> Option<String> {
        match self.git.main_branch().await {
            Ok(Some(branch)) => Some(format!(
                "Main branch (you will usually use this for PRs): {}",
                branch
            )),
            Ok(None) => None,
            Err(e) => {
                tracing::debug!("Omitting main branch: {}", e);
                None
            }
        }
    }

    async fn status_block(&self) -> Option<String> {
        match self.git.status().await {
            Ok(raw) => Some(format!("Status:\n{}", self.filter.apply(&raw).join("\n"))),
            Err(e) => {
                tracing::debug!("Omitting working tree status: {}", e);
                None
            }
        }
    }

    async fn commits_block(&self) -> Option<String> {
        match self.git.recent_commits(self.sections.commits).await {
            Ok(commits) if !commits.is_empty() => {
                Some(format!("Recent commits:\n{}", commits.join("\n")))
            }
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("Omitting recent commits: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl ContextProvider for GitStatusProvider {
    fn name(&self) -> &str {
        "git_status"
    }

    async fn get_context(&self) -> Result<Option<String>> {
        if !self.sections.any() {
            return Ok(None);
        }
        if !self.git.is_repository().await {
            tracing::debug!("Not a git repository, omitting git context");
            return Ok(None);
        }

        let mut blocks = Vec::new();
        if self.sections.branch {
            blocks.extend(self.branch_block().await);
        }
        if self.sections.main_branch {
            blocks.extend(self.main_branch_block().await);
        }
        if self.sections.status {
            blocks.extend(self.status_block().await);
        }
        if self.sections.commits > 0 {
            blocks.extend(self.commits_block().await);
        }

        if blocks.is_empty() {
            return Ok(None);
        }
        Ok(Some(format!(
            "{}\n{}",
            GIT_SNAPSHOT_HEADER,
            blocks.join("\n\n")
        )))
    }
}
