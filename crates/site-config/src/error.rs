//! Error types for site-config

use std::path::PathBuf;

/// Result type for site-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during configuration resolution
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required user configuration file is missing
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Name does not match any of the five fixed namespaces
    #[error("Unknown namespace: {name}")]
    UnknownNamespace { name: String },

    /// The mandatory default settings source failed to load
    #[error("Failed to load default settings: {reason}")]
    DefaultsLoad { reason: String },

    /// User override source exists but is malformed
    #[error("Failed to load user override {path}: {reason}")]
    OverrideLoad { path: String, reason: String },

    /// An ignore-pattern entry could not be compiled
    #[error("Invalid ignore pattern at index {index}: {reason}")]
    PatternCompile { index: usize, reason: String },

    /// Contract violation on a namespace store
    #[error(transparent)]
    Namespace(#[from] site_namespace::Error),
}

/// Failure of a single plugin during the plugins stage.
///
/// Collected into the [`LoadReport`](crate::pipeline::LoadReport) instead of
/// propagated; one bad plugin must not block unrelated plugins or later
/// stages.
#[derive(Debug, thiserror::Error)]
#[error("Plugin {plugin} failed: {reason}")]
pub struct PluginError {
    /// Name of the plugin that failed
    pub plugin: String,
    /// Human-readable failure description
    pub reason: String,
}

impl PluginError {
    pub fn new(plugin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            reason: reason.into(),
        }
    }
}
