//! Context manager for assembling the injected text
//!
//! The ContextManager asks each provider for its section, in registration
//! order, and joins the sections that came back.

use anyhow::Result;
use std::sync::Arc;

use super::providers::ContextProvider;

/// Source tag on the `<system-reminder>` wrapper
pub const REMINDER_SOURCE: &str = "hooks-status-context";

const REMINDER_NOTE: &str = "This context is for your reference only. DO NOT mention this status information to the user unless directly relevant to their question. Process silently and continue your work.";

/// Manages the sections of the status injection
pub struct ContextManager {
    /// Context providers, rendered in order
    providers: Vec<Arc<dyn ContextProvider>>,
    /// Wrap the output in a `<system-reminder>` block
    wrap_system_reminder: bool,
}

impl ContextManager {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            wrap_system_reminder: false,
        }
    }

    /// Add a context provider
    pub fn add_provider<P: ContextProvider + 'static>(&mut self, provider: P) {
        self.providers.push(Arc::new(provider));
    }

    pub fn with_system_reminder(mut self, wrap: bool) -> Self {
        self.wrap_system_reminder = wrap;
        self
    }

    /// Names of the registered providers, in render order
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Build the injected text
    ///
    /// Sections are separated by a blank line. Returns None when no
    /// provider produced anything.
    pub async fn build_context(&self) -> Result<Option<String>> {
        let mut parts = Vec::new();

        for provider in &self.providers {
            match provider.get_context().await? {
                Some(context) if !context.trim().is_empty() => parts.push(context),
                _ => tracing::debug!("Provider {} produced no context", provider.name()),
            }
        }

        if parts.is_empty() {
            return Ok(None);
        }

        let content = parts.join("\n\n");
        if self.wrap_system_reminder {
            Ok(Some(wrap_system_reminder(&content)))
        } else {
            Ok(Some(content))
        }
    }
}

impl Default for ContextManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap text in a `<system-reminder>` block with the reference-only note
pub fn wrap_system_reminder(content: &str) -> String {
    format!(
        "<system-reminder source=\"{}\">\n{}\n\n{}\n</system-reminder>",
        REMINDER_SOURCE, content, REMINDER_NOTE
    )
}
