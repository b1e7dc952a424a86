// src/config/mod.rs

//! Plugin configuration.
//!
//! Responsibilities:
//! - Locate this plugin's entry in the CI plugin list (`loader.rs`).
//! - Decode it into a loosely-typed raw form (`raw.rs`).
//! - Normalize that into the strict model (`normalize.rs`, `notify.rs`,
//!   `model.rs`).

pub mod loader;
pub mod model;
pub mod normalize;
pub mod notify;
pub mod raw;

pub use loader::{initialize_plugin, plugin_basename, refers_to_plugin};
pub use model::{
    BuildSpec, CommandSpec, HookCommand, Notification, NotifyTarget, PluginConfig, StepSpec,
    WatchRule, DEFAULT_DIFF_COMMAND, PLUGIN_NAME,
};
pub use normalize::{escape_interpolation, Normalizer};
pub use notify::{classify_notifications, NotifyLevel};
pub use raw::RawPlugin;
