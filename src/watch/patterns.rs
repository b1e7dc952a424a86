// src/watch/patterns.rs

use std::fmt;

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};

use crate::config::model::WatchRule;
use crate::errors::{MonorepoDiffError, Result};

/// Pattern syntax:
///
/// - a pattern with no wildcard is a path prefix, matched on segment
///   boundaries: `"watch-path"` matches `"watch-path"` and
///   `"watch-path/anything"` (a trailing `/` is optional);
/// - `*` (and `?`, `[..]`, `{a,b}`) match within a single segment, so
///   `"*.txt"` matches `"text.txt"` but not `"docs/text.txt"`;
/// - `**` spans zero or more segments: `"**/*.txt"` matches at any depth.
const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Evaluate one changed-file path against one pattern.
pub fn matches_pattern(pattern: &str, path: &str) -> Result<bool> {
    if is_literal(pattern) {
        check_literal(pattern)?;
        return Ok(is_path_prefix(pattern, path));
    }
    Ok(compile_glob(pattern)?.compile_matcher().is_match(path))
}

/// A compiled list of patterns; matches if any pattern does.
#[derive(Clone)]
pub struct PatternSet {
    prefixes: Vec<String>,
    globs: GlobSet,
    sources: Vec<String>,
}

impl fmt::Debug for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternSet")
            .field("patterns", &self.sources)
            .finish_non_exhaustive()
    }
}

impl PatternSet {
    pub fn build(patterns: &[String]) -> Result<Self> {
        let mut prefixes = Vec::new();
        let mut builder = GlobSetBuilder::new();

        for pattern in patterns {
            if is_literal(pattern) {
                check_literal(pattern)?;
                prefixes.push(pattern.clone());
            } else {
                builder.add(compile_glob(pattern)?);
            }
        }

        let globs = builder.build().map_err(|e| MonorepoDiffError::InvalidPattern {
            pattern: patterns.join(", "),
            reason: e.to_string(),
        })?;

        Ok(Self {
            prefixes,
            globs,
            sources: patterns.to_vec(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.prefixes.iter().any(|p| is_path_prefix(p, path)) || self.globs.is_match(path)
    }
}

/// Compiled path and skip patterns of one watch rule.
#[derive(Debug, Clone)]
pub struct RuleProfile {
    paths: PatternSet,
    skips: PatternSet,
    is_default: bool,
}

impl RuleProfile {
    pub fn compile(rule: &WatchRule) -> Result<Self> {
        Ok(Self {
            paths: PatternSet::build(&rule.paths)?,
            skips: PatternSet::build(&rule.skip_paths)?,
            is_default: rule.is_default,
        })
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// True if `path` matches a path pattern and no skip pattern.
    ///
    /// Skips are checked against this file alone: skipping one file never
    /// hides another file that matches the same path pattern.
    pub fn matches(&self, path: &str) -> bool {
        self.paths.is_match(path) && !self.skips.is_match(path)
    }

    /// True if any changed file is matched. A rule without path patterns
    /// never fires this way.
    pub fn fires_for<S: AsRef<str>>(&self, changed_files: &[S]) -> bool {
        !self.paths.is_empty() && changed_files.iter().any(|f| self.matches(f.as_ref()))
    }
}

fn is_literal(pattern: &str) -> bool {
    !pattern.contains(GLOB_META)
}

fn check_literal(pattern: &str) -> Result<()> {
    if pattern.trim_matches('/').is_empty() {
        return Err(MonorepoDiffError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: "pattern is empty".to_string(),
        });
    }
    Ok(())
}

fn compile_glob(pattern: &str) -> Result<Glob> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(false)
        .build()
        .map_err(|e| MonorepoDiffError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.kind().to_string(),
        })
}

fn is_path_prefix(prefix: &str, path: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
