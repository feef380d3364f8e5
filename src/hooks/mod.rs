//! Hooks Module
//!
//! The status context hook and the types it exchanges with the host.
//!
//! # Overview
//!
//! The host fires `prompt:submit` before each prompt reaches the model. The
//! hook answers with either:
//!
//! | Result | Effect |
//! |--------|--------|
//! | `HookResult::none()` | Continue normally, nothing injected |
//! | `HookResult::inject_context(text)` | Insert `text` into the conversation |
//!
//! # Example
//!
//! ```ignore
//! use status_context_hook::{HookEvent, StatusContextConfig, StatusContextHook};
//!
//! let config = StatusContextConfig::default().with_recent_commits(3);
//! let hook = StatusContextHook::new(config);
//!
//! // Tell the host where to register us
//! let registration = hook.registration();
//!
//! // On each prompt submission
//! let result = hook.handle(HookEvent::PromptSubmit).await?;
//! if let Some(text) = result.text() {
//!     println!("{}", text);
//! }
//! ```
//!
//! # Sections
//!
//! | Section | Toggle | Omitted when |
//! |---------|--------|--------------|
//! | Datetime | `include_datetime` | never |
//! | Current branch | `git_include_branch` | detached HEAD, query failed |
//! | Main branch | `git_include_main_branch` | no `main`/`master`, query failed |
//! | Status | `git_include_status` | query failed |
//! | Recent commits | `git_include_commits > 0` | no commits, query failed |
//!
//! All git sections are dropped outside a repository. Git problems never
//! surface as errors; only a clock failure does.

mod status_context;
mod types;

pub use status_context::{StatusContextHook, HOOK_NAME};
pub use types::{HookAction, HookEvent, HookRegistration, HookResult, InjectionRole};
