//! Configuration values stored in a namespace tree

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::store::Store;

/// Opaque callable payload registered by a collaborator.
///
/// Filters store their transforms and controllers their entry points in the
/// namespace tree. The store only moves these around, so the payload is
/// type-erased here and downcast again at the point of use.
#[derive(Clone)]
pub struct Hook(Arc<dyn Any + Send + Sync>);

impl Hook {
    pub fn new<T: Any + Send + Sync>(payload: T) -> Self {
        Self(Arc::new(payload))
    }

    /// Typed access to the payload.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Hook(..)")
    }
}

impl PartialEq for Hook {
    /// Hooks compare by identity: two hooks are equal only when they share
    /// the same payload.
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A single slot in a namespace store.
///
/// Either a leaf (scalar, list, compiled matcher, hook) or a nested
/// [`Store`].
#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    /// A compiled, case-insensitive matcher. Equality compares the pattern
    /// source text.
    Pattern(Regex),
    Hook(Hook),
    Store(Store),
}

impl Value {
    /// Short variant name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Pattern(_) => "pattern",
            Value::Hook(_) => "hook",
            Value::Store(_) => "store",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_pattern(&self) -> Option<&Regex> {
        match self {
            Value::Pattern(regex) => Some(regex),
            _ => None,
        }
    }

    pub fn as_hook(&self) -> Option<&Hook> {
        match self {
            Value::Hook(hook) => Some(hook),
            _ => None,
        }
    }

    pub fn as_store(&self) -> Option<&Store> {
        match self {
            Value::Store(store) => Some(store),
            _ => None,
        }
    }

    pub fn is_store(&self) -> bool {
        matches!(self, Value::Store(_))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Pattern(a), Value::Pattern(b)) => a.as_str() == b.as_str(),
            (Value::Hook(a), Value::Hook(b)) => a == b,
            (Value::Store(a), Value::Store(b)) => a == b,
            _ => false,
        }
    }
}

impl Serialize for Value {
    /// Debug rendering: patterns serialize as their source text, hooks as a
    /// placeholder marker.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Pattern(regex) => serializer.serialize_str(regex.as_str()),
            Value::Hook(_) => serializer.serialize_str("<hook>"),
            Value::Store(store) => store.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Regex> for Value {
    fn from(regex: Regex) -> Self {
        Value::Pattern(regex)
    }
}

impl From<Hook> for Value {
    fn from(hook: Hook) -> Self {
        Value::Hook(hook)
    }
}

impl From<Store> for Value {
    fn from(store: Store) -> Self {
        Value::Store(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_equality_compares_source_text() {
        let a = Value::Pattern(Regex::new("abc").unwrap());
        let b = Value::Pattern(Regex::new("abc").unwrap());
        let c = Value::Pattern(Regex::new("xyz").unwrap());

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn hook_equality_is_identity() {
        let hook = Hook::new("payload".to_string());
        let same = Value::Hook(hook.clone());
        let other = Value::Hook(Hook::new("payload".to_string()));

        assert_eq!(Value::Hook(hook), same);
        assert_ne!(same, other);
    }

    #[test]
    fn hook_downcasts_to_payload_type() {
        let hook = Hook::new(42usize);

        assert_eq!(hook.downcast_ref::<usize>(), Some(&42));
        assert_eq!(hook.downcast_ref::<String>(), None);
    }

    #[test]
    fn scalar_conversions() {
        assert_eq!(Value::from("title"), Value::String("title".to_string()));
        assert_eq!(Value::from(10), Value::Int(10));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(
            Value::from(vec!["a", "b"]),
            Value::List(vec![Value::from("a"), Value::from("b")])
        );
    }
}
