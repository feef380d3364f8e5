//! Status line classification and truncation
//!
//! `git status --short` can list thousands of paths when a dependency or
//! build directory is not ignored. [`StatusFilter`] sorts each line into one
//! of three tiers and caps what reaches the context:
//!
//! - Tier 1 (hidden): dependency, cache and build output directories
//! - Tier 2 (limited): lock files, editor state, logs, generated assets
//! - Tier 3 (shown): everything else

use glob::Pattern;

use crate::config::StatusContextConfig;

/// Paths that never belong in the context, even when tracked
pub const DEFAULT_TIER1_PATTERNS: &[&str] = &[
    "node_modules/**",
    ".npm/**",
    ".yarn/**",
    ".pnpm-store/**",
    ".venv/**",
    "venv/**",
    "env/**",
    "ENV/**",
    "__pycache__/**",
    "*.pyc",
    "*.pyo",
    ".pytest_cache/**",
    ".mypy_cache/**",
    ".ruff_cache/**",
    "build/**",
    "dist/**",
    "out/**",
    "target/**",
    "bin/**",
    "obj/**",
    ".git/**",
];

/// Support files shown up to a limit
pub const DEFAULT_TIER2_PATTERNS: &[&str] = &[
    "*.lock",
    "*.sum",
    "yarn.lock",
    "package-lock.json",
    "Gemfile.lock",
    ".idea/**",
    ".vscode/**",
    "*.swp",
    "*.swo",
    "*.log",
    "logs/**",
    "coverage/**",
    ".coverage",
    "*.min.js",
    "*.min.css",
    "*.map",
];

/// Shown when the status has no entries
pub const CLEAN_MARKER: &str = "Working directory clean";

/// One parsed `git status --short` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Two-character state code, e.g. ` M`, `A `, `??`
    pub code: String,
    pub path: String,
    pub raw: String,
}

impl StatusLine {
    pub fn parse(line: &str) -> Self {
        let code = line.get(..2).unwrap_or(line).to_string();
        let path = line.get(3..).unwrap_or("").trim();
        // Renames read "old -> new"; classify by where the file is now
        let path = path.rsplit(" -> ").next().unwrap_or(path).trim_matches('"');
        Self {
            code,
            path: path.to_string(),
            raw: line.to_string(),
        }
    }

    pub fn is_untracked(&self) -> bool {
        self.code == "??"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Ignored,
    Limited,
    Shown,
}

/// A tier pattern: `dir/**` matches everything under `dir/`, anything else as a glob
#[derive(Debug, Clone)]
enum PathPattern {
    Directory(String),
    Glob(Pattern),
}

impl PathPattern {
    fn compile(raw: &str) -> Option<Self> {
        if let Some(dir) = raw.strip_suffix("/**") {
            return Some(Self::Directory(format!("{}/", dir)));
        }
        match Pattern::new(raw) {
            Ok(pattern) => Some(Self::Glob(pattern)),
            Err(e) => {
                tracing::warn!("Ignoring invalid status pattern {:?}: {}", raw, e);
                None
            }
        }
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            Self::Directory(dir) => path.starts_with(dir.as_str()),
            Self::Glob(pattern) => pattern.matches(path),
        }
    }
}

/// Tiered filter applied to the status section
#[derive(Debug, Clone)]
pub struct StatusFilter {
    path_filtering: bool,
    tier1: Vec<PathPattern>,
    tier2: Vec<PathPattern>,
    include_untracked: bool,
    max_tracked: usize,
    max_untracked: usize,
    tier2_limit: usize,
    max_lines: usize,
    show_summary: bool,
}

impl StatusFilter {
    pub fn from_config(config: &StatusContextConfig) -> Self {
        let compile = |defaults: &[&str], extra: &[String]| -> Vec<PathPattern> {
            defaults
                .iter()
                .copied()
                .chain(extra.iter().map(String::as_str))
                .filter_map(PathPattern::compile)
                .collect()
        };

        Self {
            path_filtering: config.git_status_enable_path_filtering,
            tier1: compile(DEFAULT_TIER1_PATTERNS, &config.git_status_tier1_patterns_extend),
            tier2: compile(DEFAULT_TIER2_PATTERNS, &config.git_status_tier2_patterns_extend),
            include_untracked: config.git_status_include_untracked,
            max_tracked: config.git_status_max_tracked,
            max_untracked: config.git_status_max_untracked,
            tier2_limit: config.git_status_tier2_limit,
            max_lines: config.git_status_max_lines,
            show_summary: config.git_status_show_filter_summary,
        }
    }

    pub fn classify(&self, line: &StatusLine) -> Tier {
        if !self.path_filtering {
            return Tier::Shown;
        }
        if self.tier1.iter().any(|p| p.matches(&line.path)) {
            Tier::Ignored
        } else if self.tier2.iter().any(|p| p.matches(&line.path)) {
            Tier::Limited
        } else {
            Tier::Shown
        }
    }

    /// Filter raw status lines into the lines to display
    pub fn apply(&self, raw: &[String]) -> Vec<String> {
        if raw.is_empty() {
            return vec![CLEAN_MARKER.to_string()];
        }

        let mut ignored_tracked = Vec::new();
        let mut ignored_untracked = 0usize;
        let mut limited = Vec::new();
        let mut tracked = Vec::new();
        let mut untracked = Vec::new();

        for line in raw.iter().map(|l| StatusLine::parse(l)) {
            match (self.classify(&line), line.is_untracked()) {
                (Tier::Ignored, true) => ignored_untracked += 1,
                (Tier::Ignored, false) => ignored_tracked.push(line.raw),
                (Tier::Limited, _) => limited.push(line.raw),
                (Tier::Shown, true) => untracked.push(line.raw),
                (Tier::Shown, false) => tracked.push(line.raw),
            }
        }

        let mut out = Vec::new();
        self.push_capped(&mut out, tracked, self.max_tracked, "tracked files");
        if self.include_untracked {
            self.push_capped(&mut out, untracked, self.max_untracked, "untracked files");
        }
        self.push_capped(&mut out, limited, self.tier2_limit, "support files");

        if self.show_summary {
            if !out.is_empty() && (!ignored_tracked.is_empty() || ignored_untracked > 0) {
                out.push(String::new());
            }
            if !ignored_tracked.is_empty() {
                out.push(format!(
                    "[WARNING: {} tracked files in ignored paths]",
                    ignored_tracked.len()
                ));
                out.extend(ignored_tracked.iter().take(3).map(|l| format!("  {}", l)));
                if ignored_tracked.len() > 3 {
                    out.push(format!("  ... and {} more", ignored_tracked.len() - 3));
                }
                out.push("[Suggestion: These directories should not be tracked]".to_string());
            }
            if ignored_untracked > 0 {
                out.push(format!(
                    "[Filtered: {} untracked files in ignored paths]",
                    ignored_untracked
                ));
            }
        }

        if self.max_lines > 0 && out.len() > self.max_lines {
            out.truncate(self.max_lines);
            out.push(format!(
                "[Hard limit reached: output truncated to {} lines]",
                self.max_lines
            ));
        }

        if out.is_empty() {
            out.push(CLEAN_MARKER.to_string());
        }
        out
    }

    fn push_capped(&self, out: &mut Vec<String>, lines: Vec<String>, cap: usize, label: &str) {
        if cap == 0 || lines.len() <= cap {
            out.extend(lines);
            return;
        }
        let omitted = lines.len() - cap;
        out.extend(lines.into_iter().take(cap));
        if self.show_summary {
            out.push(format!("... ({} more {} omitted)", omitted, label));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn filter() -> StatusFilter {
        StatusFilter::from_config(&StatusContextConfig::default())
    }

    #[test]
    fn test_parse_status_line() {
        let line = StatusLine::parse(" M src/lib.rs");
        assert_eq!(line.code, " M");
        assert_eq!(line.path, "src/lib.rs");
        assert!(!line.is_untracked());

        let line = StatusLine::parse("?? notes.txt");
        assert!(line.is_untracked());
        assert_eq!(line.path, "notes.txt");
    }

    #[test]
    fn test_parse_rename_uses_destination() {
        let line = StatusLine::parse("R  old/name.rs -> node_modules/name.rs");
        assert_eq!(line.path, "node_modules/name.rs");
    }

    #[test]
    fn test_clean_tree() {
        assert_eq!(filter().apply(&[]), vec![CLEAN_MARKER.to_string()]);
    }

    #[test]
    fn test_classification() {
        let f = filter();
        assert_eq!(f.classify(&StatusLine::parse("?? node_modules/x/index.js")), Tier::Ignored);
        assert_eq!(f.classify(&StatusLine::parse(" M app/cache.pyc")), Tier::Ignored);
        assert_eq!(f.classify(&StatusLine::parse(" M Cargo.lock")), Tier::Limited);
        assert_eq!(f.classify(&StatusLine::parse(" M .vscode/settings.json")), Tier::Limited);
        assert_eq!(f.classify(&StatusLine::parse(" M src/main.rs")), Tier::Shown);
        assert_eq!(f.classify(&StatusLine::parse(" M environment.rs")), Tier::Shown);
        assert_eq!(f.classify(&StatusLine::parse("?? binary/tool.rs")), Tier::Shown);
    }

    #[test]
    fn test_path_filtering_disabled() {
        let config = StatusContextConfig {
            git_status_enable_path_filtering: false,
            ..Default::default()
        };
        let f = StatusFilter::from_config(&config);
        assert_eq!(f.classify(&StatusLine::parse("?? node_modules/a.js")), Tier::Shown);
    }

    #[test]
    fn test_extended_patterns() {
        let config = StatusContextConfig {
            git_status_tier1_patterns_extend: vec!["generated/**".to_string()],
            git_status_tier2_patterns_extend: vec!["*.snap".to_string()],
            ..Default::default()
        };
        let f = StatusFilter::from_config(&config);
        assert_eq!(f.classify(&StatusLine::parse(" M generated/api.rs")), Tier::Ignored);
        assert_eq!(f.classify(&StatusLine::parse(" M tests/out.snap")), Tier::Limited);
    }

    #[test]
    fn test_shown_lines_keep_order_and_codes() {
        let out = filter().apply(&lines(&[" M src/a.rs", "A  src/b.rs", "?? src/c.rs"]));
        assert_eq!(out, lines(&[" M src/a.rs", "A  src/b.rs", "?? src/c.rs"]));
    }

    #[test]
    fn test_untracked_can_be_hidden() {
        let config = StatusContextConfig {
            git_status_include_untracked: false,
            ..Default::default()
        };
        let out = StatusFilter::from_config(&config).apply(&lines(&[" M a.rs", "?? b.rs"]));
        assert_eq!(out, lines(&[" M a.rs"]));
    }

    #[test]
    fn test_tracked_cap_with_summary() {
        let config = StatusContextConfig {
            git_status_max_tracked: 2,
            ..Default::default()
        };
        let out = StatusFilter::from_config(&config).apply(&lines(&[" M a", " M b", " M c", " M d"]));
        assert_eq!(out, lines(&[" M a", " M b", "... (2 more tracked files omitted)"]));
    }

    #[test]
    fn test_tier1_summaries() {
        let raw = lines(&[
            " M src/a.rs",
            " M target/debug/a",
            " M target/debug/b",
            " M target/debug/c",
            " M target/debug/d",
            "?? node_modules/x.js",
        ]);
        let out = filter().apply(&raw);
        assert_eq!(
            out,
            lines(&[
                " M src/a.rs",
                "",
                "[WARNING: 4 tracked files in ignored paths]",
                "   M target/debug/a",
                "   M target/debug/b",
                "   M target/debug/c",
                "  ... and 1 more",
                "[Suggestion: These directories should not be tracked]",
                "[Filtered: 1 untracked files in ignored paths]",
            ])
        );
    }

    #[test]
    fn test_only_ignored_without_summary_reads_clean() {
        let config = StatusContextConfig {
            git_status_show_filter_summary: false,
            ..Default::default()
        };
        let out = StatusFilter::from_config(&config).apply(&lines(&["?? node_modules/a.js"]));
        assert_eq!(out, vec![CLEAN_MARKER.to_string()]);
    }

    #[test]
    fn test_hard_line_limit() {
        let config = StatusContextConfig {
            git_status_max_lines: 3,
            ..Default::default()
        };
        let raw: Vec<String> = (0..10).map(|i| format!(" M file{}.rs", i)).collect();
        let out = StatusFilter::from_config(&config).apply(&raw);
        assert_eq!(out.len(), 4);
        assert_eq!(out[3], "[Hard limit reached: output truncated to 3 lines]");
    }

    #[test]
    fn test_zero_cap_is_unlimited() {
        let config = StatusContextConfig {
            git_status_max_untracked: 0,
            ..Default::default()
        };
        let raw: Vec<String> = (0..30).map(|i| format!("?? new{}.rs", i)).collect();
        let out = StatusFilter::from_config(&config).apply(&raw);
        assert_eq!(out.len(), 30);
    }
}
