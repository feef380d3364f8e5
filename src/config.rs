//! Hook configuration
//!
//! The host hands the hook a flat config map on every invocation. It is
//! deserialized into [`StatusContextConfig`]; missing keys take their
//! defaults and unknown keys are ignored.
//!
//! Loading never fails on a bad value. Each known option is coerced first:
//!
//! | Option kind | Accepted | Coerced |
//! |---|---|---|
//! | count | integer | negative to 0, `null` to 0, float truncated, numeric string parsed |
//! | toggle | bool | number (non-zero is true), `"true"`/`"yes"`/`"on"`/`"1"` and their negatives |
//! | pattern list | array of strings | single string to a one-item list, non-string items dropped |
//!
//! Anything else is logged and the option keeps its default.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_GIT_TIMEOUT_MS: usize = 2000;

const COUNT_OPTIONS: [&str; 6] = [
    "git_include_commits",
    "git_timeout_ms",
    "git_status_max_untracked",
    "git_status_max_tracked",
    "git_status_max_lines",
    "git_status_tier2_limit",
];

const TOGGLE_OPTIONS: [&str; 10] = [
    "include_git",
    "git_include_status",
    "git_include_branch",
    "git_include_main_branch",
    "git_status_include_untracked",
    "git_status_enable_path_filtering",
    "git_status_show_filter_summary",
    "include_datetime",
    "datetime_include_timezone",
    "wrap_system_reminder",
];

const PATTERN_OPTIONS: [&str; 2] = [
    "git_status_tier1_patterns_extend",
    "git_status_tier2_patterns_extend",
];

/// Errors raised while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for the status context hook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusContextConfig {
    /// Directory the git queries run in
    pub working_dir: PathBuf,

    /// Master toggle for all git sections
    pub include_git: bool,
    pub git_include_status: bool,
    /// Number of recent commits to show (0 disables the section)
    pub git_include_commits: usize,
    pub git_include_branch: bool,
    pub git_include_main_branch: bool,
    /// Kill a git subprocess after this many milliseconds
    pub git_timeout_ms: usize,

    pub git_status_include_untracked: bool,
    pub git_status_max_untracked: usize,
    pub git_status_max_tracked: usize,
    pub git_status_max_lines: usize,
    pub git_status_enable_path_filtering: bool,
    pub git_status_tier1_patterns_extend: Vec<String>,
    pub git_status_tier2_patterns_extend: Vec<String>,
    pub git_status_tier2_limit: usize,
    pub git_status_show_filter_summary: bool,

    /// Master toggle for the datetime section
    pub include_datetime: bool,
    pub datetime_include_timezone: bool,

    /// Wrap the injected text in a `<system-reminder>` block
    pub wrap_system_reminder: bool,

    /// Ordering hint for the host, lower runs earlier
    pub priority: i32,
}

impl Default for StatusContextConfig {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            include_git: true,
            git_include_status: true,
            git_include_commits: 5,
            git_include_branch: true,
            git_include_main_branch: true,
            git_timeout_ms: DEFAULT_GIT_TIMEOUT_MS,
            git_status_include_untracked: true,
            git_status_max_untracked: 20,
            git_status_max_tracked: 50,
            git_status_max_lines: 100,
            git_status_enable_path_filtering: true,
            git_status_tier1_patterns_extend: Vec::new(),
            git_status_tier2_patterns_extend: Vec::new(),
            git_status_tier2_limit: 10,
            git_status_show_filter_summary: true,
            include_datetime: true,
            datetime_include_timezone: false,
            wrap_system_reminder: false,
            priority: 0,
        }
    }
}

impl StatusContextConfig {
    /// Build a config from the host's JSON config object
    ///
    /// `null` or a non-object yields the defaults. Malformed options are
    /// coerced or fall back to their defaults, see the module docs.
    pub fn from_value(value: Value) -> Self {
        let options = match value {
            Value::Object(options) => options,
            Value::Null => return Self::default(),
            other => {
                tracing::warn!("Hook config must be an object, got {}; using defaults", other);
                return Self::default();
            }
        };

        match serde_json::from_value(Value::Object(normalize_options(options))) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Unusable hook config ({}); using defaults", e);
                Self::default()
            }
        }
    }

    /// Load a config from a JSON file
    ///
    /// Only an unreadable file or invalid JSON is an error; option values
    /// are handled as in [`StatusContextConfig::from_value`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&raw)?;
        Ok(Self::from_value(value))
    }

    /// Set the working directory
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    /// Enable or disable all git sections
    pub fn with_git(mut self, enabled: bool) -> Self {
        self.include_git = enabled;
        self
    }

    /// Enable or disable the datetime section
    pub fn with_datetime(mut self, enabled: bool) -> Self {
        self.include_datetime = enabled;
        self
    }

    /// Set the number of recent commits to include
    pub fn with_recent_commits(mut self, count: usize) -> Self {
        self.git_include_commits = count;
        self
    }

    /// Working directory resolved against the process working directory
    pub fn resolved_working_dir(&self) -> PathBuf {
        if self.working_dir.is_absolute() {
            return self.working_dir.clone();
        }
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(&self.working_dir),
            Err(_) => self.working_dir.clone(),
        }
    }

    /// Per-query git timeout; 0 falls back to the default
    pub fn git_timeout(&self) -> Duration {
        match self.git_timeout_ms {
            0 => Duration::from_millis(DEFAULT_GIT_TIMEOUT_MS as u64),
            ms => Duration::from_millis(ms as u64),
        }
    }

    /// Whether any git sub-section is switched on
    pub fn wants_git(&self) -> bool {
        self.include_git
            && (self.git_include_branch
                || self.git_include_main_branch
                || self.git_include_status
                || self.git_include_commits > 0)
    }
}

/// Coerce every known option into the shape the struct expects
///
/// Options that cannot be coerced are dropped so serde fills in the default.
fn normalize_options(options: Map<String, Value>) -> Map<String, Value> {
    options
        .into_iter()
        .filter_map(|(key, value)| {
            let name = key.as_str();
            let coerced = if COUNT_OPTIONS.contains(&name) {
                lenient_count(&value).map(Value::from)
            } else if TOGGLE_OPTIONS.contains(&name) {
                if value.is_null() {
                    return None;
                }
                lenient_toggle(&value).map(Value::from)
            } else if PATTERN_OPTIONS.contains(&name) {
                lenient_patterns(&value).map(Value::from)
            } else {
                match name {
                    "priority" => lenient_priority(&value).map(Value::from),
                    "working_dir" => value.is_string().then(|| value.clone()),
                    _ => Some(value.clone()),
                }
            };

            if coerced.is_none() {
                tracing::warn!("Ignoring invalid value {} for config option {}", value, key);
            }
            coerced.map(|value| (key, value))
        })
        .collect()
}

/// Non-negative count; `null` means 0
fn lenient_count(value: &Value) -> Option<usize> {
    match value {
        Value::Null => Some(0),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(usize::try_from(i.max(0)).unwrap_or(usize::MAX))
            } else if let Some(u) = n.as_u64() {
                Some(usize::try_from(u).unwrap_or(usize::MAX))
            } else {
                n.as_f64().and_then(truncate_count)
            }
        }
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(i) => Some(usize::try_from(i.max(0)).unwrap_or(usize::MAX)),
                Err(_) => s.parse::<f64>().ok().and_then(truncate_count),
            }
        }
        _ => None,
    }
}

fn truncate_count(f: f64) -> Option<usize> {
    // `as` saturates, NaN has no sensible count
    f.is_finite().then(|| f.max(0.0) as usize)
}

fn lenient_toggle(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn lenient_priority(value: &Value) -> Option<i32> {
    let raw = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        })?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    Some(raw.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

fn lenient_patterns(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Null => Some(Vec::new()),
        Value::String(s) => Some(vec![s.clone()]),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| item.as_str().map(String::from))
                .collect(),
        ),
        _ => None,
    }
}
