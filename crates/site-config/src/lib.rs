//! Layered configuration resolution for the site engine
//!
//! This crate resolves the configuration state a separate build pipeline
//! consumes. Five named namespaces (`site`, `controllers`, `filters`,
//! `plugins`, `templates`) are populated by a strict, ordered pipeline:
//!
//! ```text
//! defaults -> plugins -> filters -> controllers -> override -> finalize
//! ```
//!
//! Each stage reads and extends what earlier stages wrote. The user
//! override is applied second to last so its leaves win over every earlier
//! value, and derived state (the compiled ignore-pattern list) is computed
//! strictly after it so user-added patterns are never missed.
//!
//! # Architecture
//!
//! `site-config` sits above the storage substrate:
//!
//! ```text
//!      build pipeline (external)
//!               |
//!          site-config
//!               |
//!        site-namespace
//! ```
//!
//! # Example
//!
//! ```ignore
//! use site_config::{NamespaceRegistry, Pipeline, TomlDefaults, TomlOverride};
//!
//! let mut registry = NamespaceRegistry::new();
//! let mut pipeline = Pipeline::new(TomlDefaults::inline(DEFAULT_SETTINGS))
//!     .with_override_source(TomlOverride::optional("_config.toml"));
//! let report = pipeline.run_clean(&mut registry)?;
//! for failure in &report.plugin_failures {
//!     eprintln!("warning: {failure}");
//! }
//! ```

pub mod error;
pub mod logging;
pub mod patterns;
pub mod pipeline;
pub mod registry;

pub use error::{Error, PluginError, Result};
pub use patterns::{
    COMPILED_FILE_IGNORE_PATTERNS, FILE_IGNORE_PATTERNS, compile_patterns,
    finalize_ignore_patterns,
};
pub use pipeline::{
    Bindings, ControllerLoader, DefaultSettings, FilterPreloader, LoadReport, OverrideSource,
    Pipeline, PluginLoader, Stage, TomlDefaults, TomlOverride,
};
pub use registry::{Namespace, NamespaceRegistry};
