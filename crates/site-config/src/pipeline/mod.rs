//! Load pipeline: ordered resolution of the five namespaces
//!
//! Configuration is written incrementally by independent collaborators that
//! must not need to know about each other's keys. The pipeline fixes their
//! order:
//!
//! 1. **defaults** — the mandatory built-in settings, merged into `site`
//!    (and any other namespace they target)
//! 2. **plugins** — best-effort extensions; per-plugin failures are
//!    collected, never fatal
//! 3. **filters** — filter preload, after plugins so plugin-defined
//!    filters exist
//! 4. **controllers** — controllers register directly into their namespace
//! 5. **override** — the optional user source; its leaves replace earlier
//!    values, its subtrees extend them
//! 6. **finalize** — derived state (compiled ignore patterns), strictly
//!    after the override
//!
//! Each source produces structured [`Bindings`] rather than mutating the
//! registry itself; the pipeline applies them, which is what keeps the
//! "later writes win, siblings survive" semantics in one place.

mod bindings;
mod loaders;
mod runner;
mod sources;

pub use bindings::Bindings;
pub use loaders::{ControllerLoader, FilterPreloader, PluginLoader};
pub use runner::{LoadReport, Pipeline, Stage};
pub use sources::{DefaultSettings, OverrideSource, TomlDefaults, TomlOverride};
