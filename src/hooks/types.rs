//! Host contract types
//!
//! - `HookEvent`: the host events this hook understands
//! - `HookAction`: what the host should do with the result
//! - `HookResult`: the value handed back to the host
//! - `HookRegistration`: what the host needs to register the hook

use serde::{Deserialize, Serialize};

/// Host events the hook can be fired for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookEvent {
    /// User submitted a prompt
    #[serde(rename = "prompt:submit")]
    PromptSubmit,
    /// Host is about to call the model provider
    #[serde(rename = "provider:request")]
    ProviderRequest,
}

impl HookEvent {
    /// Returns the event name as the host spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            HookEvent::PromptSubmit => "prompt:submit",
            HookEvent::ProviderRequest => "provider:request",
        }
    }
}

impl std::fmt::Display for HookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for HookEvent {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prompt:submit" => Ok(HookEvent::PromptSubmit),
            "provider:request" => Ok(HookEvent::ProviderRequest),
            _ => anyhow::bail!(
                "Unknown hook event '{}'. Valid values: prompt:submit, provider:request",
                s
            ),
        }
    }
}

/// The action the host should take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookAction {
    /// Nothing to do
    #[default]
    Continue,
    /// Insert `context_injection` into the conversation
    InjectContext,
}

/// Role the injected text is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InjectionRole {
    User,
    System,
}

/// Result returned to the host
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HookResult {
    pub action: HookAction,
    /// Text to insert (for InjectContext)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_injection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_injection_role: Option<InjectionRole>,
    /// Injected for this request only, not stored in history
    #[serde(default)]
    pub ephemeral: bool,
    /// Hide the injected text from the user's transcript view
    #[serde(default)]
    pub suppress_output: bool,
}

impl HookResult {
    /// Continue normally, inject nothing
    pub fn none() -> Self {
        Self::default()
    }

    /// Inject `text` as an ephemeral, user-role snapshot
    pub fn inject_context(text: impl Into<String>) -> Self {
        Self {
            action: HookAction::InjectContext,
            context_injection: Some(text.into()),
            context_injection_role: Some(InjectionRole::User),
            ephemeral: true,
            suppress_output: true,
        }
    }

    pub fn is_injection(&self) -> bool {
        self.action == HookAction::InjectContext
    }

    /// The injected text, if any
    pub fn text(&self) -> Option<&str> {
        self.context_injection.as_deref()
    }
}

/// What a host needs to register the hook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookRegistration {
    pub event: HookEvent,
    pub name: String,
    /// Lower runs earlier
    pub priority: i32,
}
