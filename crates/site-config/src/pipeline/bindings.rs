//! Structured bindings produced by settings sources

use std::collections::BTreeMap;

use site_namespace::{Store, Value};

use crate::error::{Error, Result};
use crate::registry::{Namespace, NamespaceRegistry};

/// Bindings resolved from one settings source, keyed by target namespace.
///
/// A source never mutates the registry directly; it returns bindings and
/// the pipeline merges them in stage order. That gives the override
/// semantics of the whole engine: a later source wins at the leaf while
/// nested domains stay additive.
///
/// The TOML form uses top-level tables named after the namespaces:
///
/// ```toml
/// [site]
/// title = "Untitled"
/// file_ignore_patterns = ["^\\.", "~$"]
///
/// [templates.engine]
/// name = "mako"
/// ```
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    namespaces: BTreeMap<Namespace, Store>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build bindings from a parsed TOML table.
    ///
    /// Every top-level key must be a table named after one of the five
    /// namespaces; anything else is fatal.
    pub fn from_table(table: &toml::Table) -> Result<Self> {
        let mut bindings = Self::new();
        for (name, value) in table {
            let ns = Namespace::parse(name).ok_or_else(|| Error::UnknownNamespace {
                name: name.clone(),
            })?;
            let subtree = match value {
                toml::Value::Table(subtree) => subtree,
                // A namespace root is a store by definition
                _ => {
                    return Err(site_namespace::Error::Conflict {
                        path: name.clone(),
                        segment: name.clone(),
                    }
                    .into());
                }
            };
            bindings.namespaces.insert(ns, store_from_table(subtree));
        }
        Ok(bindings)
    }

    /// The subtree bound for a namespace, creating it when absent.
    pub fn namespace_mut(&mut self, ns: Namespace) -> &mut Store {
        self.namespaces.entry(ns).or_default()
    }

    /// The subtree bound for a namespace, if any.
    pub fn get(&self, ns: Namespace) -> Option<&Store> {
        self.namespaces.get(&ns)
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.values().all(Store::is_empty)
    }

    /// Merge every bound subtree into its namespace.
    pub fn apply(&self, registry: &mut NamespaceRegistry) {
        for (ns, subtree) in &self.namespaces {
            registry.store_mut(*ns).merge(subtree);
        }
    }
}

fn store_from_table(table: &toml::Table) -> Store {
    let mut store = Store::new();
    for (name, value) in table {
        store.insert(name, value_from_toml(value));
    }
    store
}

fn value_from_toml(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::Int(*i),
        toml::Value::Float(f) => Value::Float(*f),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::List(items.iter().map(value_from_toml).collect()),
        toml::Value::Table(table) => Value::Store(store_from_table(table)),
    }
}
