//! Context assembly for the status injection
//!
//! This module provides the ContextManager which handles:
//! - Ordering the datetime and git sections
//! - Dropping sections that resolved to nothing
//! - Optional `<system-reminder>` wrapping

mod manager;
mod providers;

pub use manager::{wrap_system_reminder, ContextManager, REMINDER_SOURCE};
pub use providers::{
    ContextProvider, DatetimeProvider, GitSections, GitStatusProvider, GIT_SNAPSHOT_HEADER,
};

#[cfg(test)]
pub(crate) use providers::tests as test_support;
