//! Status context hook
//!
//! Before each prompt submission, gathers the current date/time and a
//! snapshot of the git repository and hands it to the host as text to inject
//! into the agent's conversation.
//!
//! - [`config`]: the hook's options and their defaults
//! - [`clock`]: wall-clock and timezone source
//! - [`git`]: read-only git queries and status filtering
//! - [`context`]: section providers and assembly
//! - [`hooks`]: the hook and the host-facing result types

pub mod clock;
pub mod config;
pub mod context;
pub mod git;
pub mod hooks;
pub mod logging;

pub use clock::{Clock, FixedClock, SystemClock, Timestamp};
pub use config::{ConfigError, StatusContextConfig};
pub use git::{GitCli, GitError, GitQuery};
pub use hooks::{HookAction, HookEvent, HookRegistration, HookResult, StatusContextHook};
