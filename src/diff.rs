// src/diff.rs

//! Parsing of the diff command's output.

use std::collections::HashSet;

/// Turn the stdout of the diff command into the list of changed files.
///
/// Paths are whitespace separated (normally one per line). Blank lines are
/// dropped, and a path listed twice keeps its first position.
pub fn parse_diff_output(output: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    output
        .split_whitespace()
        .filter(|path| seen.insert(*path))
        .map(str::to_string)
        .collect()
}
