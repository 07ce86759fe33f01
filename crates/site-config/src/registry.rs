//! The fixed set of named namespaces and their reset lifecycle

use std::fmt;

use site_namespace::Store;

use crate::error::{Error, Result};

/// One of the five fixed configuration domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    Site,
    Controllers,
    Filters,
    Plugins,
    Templates,
}

impl Namespace {
    /// All five domains, in canonical order.
    pub const ALL: [Namespace; 5] = [
        Namespace::Site,
        Namespace::Controllers,
        Namespace::Filters,
        Namespace::Plugins,
        Namespace::Templates,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Namespace::Site => "site",
            Namespace::Controllers => "controllers",
            Namespace::Filters => "filters",
            Namespace::Plugins => "plugins",
            Namespace::Templates => "templates",
        }
    }

    /// Parse a namespace from its name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "site" => Some(Namespace::Site),
            "controllers" => Some(Namespace::Controllers),
            "filters" => Some(Namespace::Filters),
            "plugins" => Some(Namespace::Plugins),
            "templates" => Some(Namespace::Templates),
            _ => None,
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Owns the five namespace stores for one engine instance.
///
/// Plain owned state rather than process-wide globals: construct one
/// registry, pass it to each pipeline run, and [`reset`](Self::reset)
/// between runs that need a clean slate. Running again without a reset
/// intentionally accumulates state, which is how a long-lived process does
/// incremental reloads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamespaceRegistry {
    site: Store,
    controllers: Store,
    filters: Store,
    plugins: Store,
    templates: Store,
}

impl NamespaceRegistry {
    /// Create a registry with all five namespaces empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all five namespaces with fresh empty stores.
    ///
    /// The five always reset together; a partial reset is not expressible.
    /// Idempotent and safe to call on an already-empty registry.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The store for a domain.
    pub fn store(&self, ns: Namespace) -> &Store {
        match ns {
            Namespace::Site => &self.site,
            Namespace::Controllers => &self.controllers,
            Namespace::Filters => &self.filters,
            Namespace::Plugins => &self.plugins,
            Namespace::Templates => &self.templates,
        }
    }

    /// Mutable store for a domain.
    pub fn store_mut(&mut self, ns: Namespace) -> &mut Store {
        match ns {
            Namespace::Site => &mut self.site,
            Namespace::Controllers => &mut self.controllers,
            Namespace::Filters => &mut self.filters,
            Namespace::Plugins => &mut self.plugins,
            Namespace::Templates => &mut self.templates,
        }
    }

    /// Look up a namespace store by name.
    ///
    /// Fails with `UnknownNamespace` for anything but the five fixed names.
    pub fn get(&self, name: &str) -> Result<&Store> {
        let ns = Namespace::parse(name).ok_or_else(|| Error::UnknownNamespace {
            name: name.to_string(),
        })?;
        Ok(self.store(ns))
    }

    /// Mutable variant of [`NamespaceRegistry::get`].
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Store> {
        let ns = Namespace::parse(name).ok_or_else(|| Error::UnknownNamespace {
            name: name.to_string(),
        })?;
        Ok(self.store_mut(ns))
    }

    pub fn site(&self) -> &Store {
        &self.site
    }

    pub fn site_mut(&mut self) -> &mut Store {
        &mut self.site
    }

    pub fn controllers(&self) -> &Store {
        &self.controllers
    }

    pub fn controllers_mut(&mut self) -> &mut Store {
        &mut self.controllers
    }

    pub fn filters(&self) -> &Store {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut Store {
        &mut self.filters
    }

    pub fn plugins(&self) -> &Store {
        &self.plugins
    }

    pub fn plugins_mut(&mut self) -> &mut Store {
        &mut self.plugins
    }

    pub fn templates(&self) -> &Store {
        &self.templates
    }

    pub fn templates_mut(&mut self) -> &mut Store {
        &mut self.templates
    }

    /// Deep copy of every namespace, for assertions and debugging.
    pub fn snapshot(&self) -> NamespaceRegistry {
        self.clone()
    }

    /// JSON rendering of all five namespaces keyed by name.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "site": self.site.to_json(),
            "controllers": self.controllers.to_json(),
            "filters": self.filters.to_json(),
            "plugins": self.plugins.to_json(),
            "templates": self.templates.to_json(),
        })
    }
}
