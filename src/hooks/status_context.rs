//! The status context hook
//!
//! Fires on `prompt:submit`, renders the datetime and git sections and hands
//! them back as a context injection.

use anyhow::Result;
use std::sync::Arc;

use super::types::{HookEvent, HookRegistration, HookResult};
use crate::clock::{Clock, SystemClock};
use crate::config::StatusContextConfig;
use crate::context::{ContextManager, DatetimeProvider, GitStatusProvider};
use crate::git::{GitCli, GitQuery};

/// Name the hook registers under
pub const HOOK_NAME: &str = "hooks-status-context";

/// Injects a datetime and git snapshot before each prompt
pub struct StatusContextHook {
    config: StatusContextConfig,
    manager: ContextManager,
}

impl StatusContextHook {
    /// Create the hook against the real repository and system clock
    pub fn new(config: StatusContextConfig) -> Self {
        let git = GitCli::new(config.resolved_working_dir()).with_timeout(config.git_timeout());
        Self::with_sources(config, Arc::new(git), Arc::new(SystemClock::new()))
    }

    /// Create the hook with explicit git and clock sources
    pub fn with_sources(
        config: StatusContextConfig,
        git: Arc<dyn GitQuery>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut manager = ContextManager::new().with_system_reminder(config.wrap_system_reminder);

        if config.include_datetime {
            manager.add_provider(
                DatetimeProvider::new(clock).with_timezone(config.datetime_include_timezone),
            );
        }
        if config.wants_git() {
            manager.add_provider(GitStatusProvider::from_config(git, &config));
        }

        tracing::debug!("Status context providers: {:?}", manager.provider_names());
        Self { config, manager }
    }

    pub fn config(&self) -> &StatusContextConfig {
        &self.config
    }

    /// Registration the host should use for this hook
    pub fn registration(&self) -> HookRegistration {
        HookRegistration {
            event: HookEvent::PromptSubmit,
            name: HOOK_NAME.to_string(),
            priority: self.config.priority,
        }
    }

    /// Dispatch a host event
    ///
    /// `prompt:submit` and `provider:request` both produce the injection.
    pub async fn handle(&self, event: HookEvent) -> Result<HookResult> {
        tracing::info!("Handling {} for {}", event, HOOK_NAME);
        match event {
            HookEvent::PromptSubmit | HookEvent::ProviderRequest => self.on_prompt_submit().await,
        }
    }

    /// Build the context injection for the next prompt
    ///
    /// Git failures only shrink the output; a clock failure is returned.
    pub async fn on_prompt_submit(&self) -> Result<HookResult> {
        match self.manager.build_context().await? {
            Some(text) => {
                tracing::debug!("Injecting {} chars of status context", text.len());
                Ok(HookResult::inject_context(text))
            }
            None => {
                tracing::debug!("No status context to inject");
                Ok(HookResult::none())
            }
        }
    }
}
