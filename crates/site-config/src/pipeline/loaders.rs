//! Collaborator traits for the middle pipeline stages
//!
//! The engine core does not implement plugin discovery or filter/controller
//! registration; it only fixes their invocation order and what each one is
//! allowed to touch.

use site_namespace::Store;

use crate::error::{PluginError, Result};
use crate::registry::NamespaceRegistry;

/// Loads plugins (stage 2).
///
/// Plugins may write into any namespace, `plugins` primarily, and often
/// register filters, controllers, or templates as a side effect. Individual
/// plugin failures are returned, not raised: they are collected into the
/// run's report and must never block unrelated plugins or later stages.
pub trait PluginLoader {
    fn load_plugins(&mut self, registry: &mut NamespaceRegistry) -> Vec<PluginError>;
}

/// Preloads filters into the `filters` namespace (stage 3).
///
/// Runs after plugins so filters defined by plugins are already present.
pub trait FilterPreloader {
    fn preload_filters(&mut self, registry: &mut NamespaceRegistry) -> Result<()>;
}

/// Loads controllers (stage 4).
///
/// Receives the `controllers` store itself rather than the whole registry;
/// controllers register directly into that subtree instead of the loader
/// inferring a namespace.
pub trait ControllerLoader {
    fn load_controllers(&mut self, controllers: &mut Store) -> Result<()>;
}
