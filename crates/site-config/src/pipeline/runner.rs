//! The ordered load pipeline

use std::fmt;

use crate::error::{PluginError, Result};
use crate::patterns;
use crate::registry::NamespaceRegistry;

use super::loaders::{ControllerLoader, FilterPreloader, PluginLoader};
use super::sources::{DefaultSettings, OverrideSource};

/// One step of the load pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Defaults,
    Plugins,
    Filters,
    Controllers,
    Override,
    Finalize,
}

impl Stage {
    /// All six stages, in execution order.
    pub const ALL: [Stage; 6] = [
        Stage::Defaults,
        Stage::Plugins,
        Stage::Filters,
        Stage::Controllers,
        Stage::Override,
        Stage::Finalize,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Defaults => "defaults",
            Stage::Plugins => "plugins",
            Stage::Filters => "filters",
            Stage::Controllers => "controllers",
            Stage::Override => "override",
            Stage::Finalize => "finalize",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of a completed pipeline run.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Per-plugin failures collected during the plugins stage. The run
    /// still completed; these are warnings for the caller to surface.
    pub plugin_failures: Vec<PluginError>,
}

impl LoadReport {
    pub fn has_warnings(&self) -> bool {
        !self.plugin_failures.is_empty()
    }
}

/// Runs the six stages in order against a caller-supplied registry.
///
/// ```text
/// defaults -> plugins -> filters -> controllers -> override -> finalize
/// ```
///
/// Defaults are mandatory. The other collaborators are optional and their
/// stages no-op when unset, since the engine does not own their
/// implementations. There is no rollback: a fatal error leaves the registry
/// partially populated, and the caller resets it before retrying.
///
/// ```ignore
/// use site_config::{NamespaceRegistry, Pipeline, TomlDefaults, TomlOverride};
///
/// let mut registry = NamespaceRegistry::new();
/// let mut pipeline = Pipeline::new(TomlDefaults::from_file("default_config.toml"))
///     .with_override_source(TomlOverride::optional("_config.toml"));
/// let report = pipeline.run_clean(&mut registry)?;
/// ```
pub struct Pipeline {
    defaults: Box<dyn DefaultSettings>,
    plugins: Option<Box<dyn PluginLoader>>,
    filters: Option<Box<dyn FilterPreloader>>,
    controllers: Option<Box<dyn ControllerLoader>>,
    user_override: Option<Box<dyn OverrideSource>>,
}

impl Pipeline {
    pub fn new(defaults: impl DefaultSettings + 'static) -> Self {
        Self {
            defaults: Box::new(defaults),
            plugins: None,
            filters: None,
            controllers: None,
            user_override: None,
        }
    }

    pub fn with_plugin_loader(mut self, loader: impl PluginLoader + 'static) -> Self {
        self.plugins = Some(Box::new(loader));
        self
    }

    pub fn with_filter_preloader(mut self, preloader: impl FilterPreloader + 'static) -> Self {
        self.filters = Some(Box::new(preloader));
        self
    }

    pub fn with_controller_loader(mut self, loader: impl ControllerLoader + 'static) -> Self {
        self.controllers = Some(Box::new(loader));
        self
    }

    pub fn with_override_source(mut self, source: impl OverrideSource + 'static) -> Self {
        self.user_override = Some(Box::new(source));
        self
    }

    /// Reset the registry, then run.
    ///
    /// The usual entry for a fresh build; [`run`](Self::run) without a
    /// reset accumulates onto the previous state instead, which is how a
    /// long-lived process does incremental reloads.
    pub fn run_clean(&mut self, registry: &mut NamespaceRegistry) -> Result<LoadReport> {
        registry.reset();
        self.run(registry)
    }

    /// Run all six stages, in order, against the registry as-is.
    pub fn run(&mut self, registry: &mut NamespaceRegistry) -> Result<LoadReport> {
        let mut report = LoadReport::default();

        // Stage 1 - defaults are mandatory, any failure aborts
        tracing::debug!(stage = %Stage::Defaults, "loading default settings");
        let defaults = self.defaults.load()?;
        defaults.apply(registry);

        // Stage 2 - plugins are best-effort; one bad plugin must not block
        // the rest
        match &mut self.plugins {
            Some(loader) => {
                tracing::debug!(stage = %Stage::Plugins, "loading plugins");
                for failure in loader.load_plugins(registry) {
                    tracing::warn!(stage = %Stage::Plugins, plugin = %failure.plugin, "{failure}");
                    report.plugin_failures.push(failure);
                }
            }
            None => tracing::debug!(stage = %Stage::Plugins, "no plugin loader, skipping"),
        }

        // Stage 3 - filters, after plugins so plugin-defined filters exist
        match &mut self.filters {
            Some(preloader) => {
                tracing::debug!(stage = %Stage::Filters, "preloading filters");
                preloader.preload_filters(registry)?;
            }
            None => tracing::debug!(stage = %Stage::Filters, "no filter preloader, skipping"),
        }

        // Stage 4 - controllers register directly into their namespace
        match &mut self.controllers {
            Some(loader) => {
                tracing::debug!(stage = %Stage::Controllers, "loading controllers");
                loader.load_controllers(registry.controllers_mut())?;
            }
            None => tracing::debug!(stage = %Stage::Controllers, "no controller loader, skipping"),
        }

        // Stage 5 - user override; its leaves win over everything earlier
        match &mut self.user_override {
            Some(source) => match source.load(registry)? {
                Some(bindings) => {
                    tracing::debug!(stage = %Stage::Override, "applying user override");
                    bindings.apply(registry);
                }
                None => tracing::debug!(stage = %Stage::Override, "user override absent, skipping"),
            },
            None => tracing::debug!(stage = %Stage::Override, "no override source, skipping"),
        }

        // Stage 6 - strictly after the override so user-added patterns are
        // picked up
        tracing::debug!(stage = %Stage::Finalize, "compiling ignore patterns");
        patterns::finalize_ignore_patterns(registry.site_mut())?;

        Ok(report)
    }
}
