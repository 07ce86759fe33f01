//! Hierarchical namespace store for the site configuration engine
//!
//! Provides the storage substrate every configuration domain is built on: a
//! nested, mutable, dotted-path-addressable tree of slots. A slot holds a
//! leaf value (scalar, list, compiled matcher, opaque hook) or a nested
//! store. Writes auto-create intermediate stores; merges overwrite at the
//! leaf and recurse into subtrees, so independent writers can each own a
//! subtree without knowing each other's keys.

pub mod error;
pub mod store;
pub mod value;

pub use error::{Error, Result};
pub use store::Store;
pub use value::{Hook, Value};
