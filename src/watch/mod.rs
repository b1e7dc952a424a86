// src/watch/mod.rs

//! Change matching.
//!
//! This module is responsible for:
//! - Compiling `path` / `skip_path` patterns per watch rule.
//! - Deciding which rules fire for a list of changed files, including the
//!   default-rule fallback.
//!
//! It does not know how the changed files were produced or how the
//! resulting steps are rendered.

pub mod patterns;
pub mod resolver;

pub use patterns::{matches_pattern, PatternSet, RuleProfile};
pub use resolver::steps_to_trigger;
