//! Ignore-pattern compilation
//!
//! The source list at `site.file_ignore_patterns` mixes raw pattern strings
//! with pre-compiled matchers. Finalization recompiles the whole list into
//! `site.compiled_file_ignore_patterns` in order, case-insensitively, after
//! the user override has had its chance to add entries.

use regex::RegexBuilder;
use site_namespace::{Store, Value};

use crate::error::{Error, Result};

/// Slot under `site` holding the raw ignore-pattern list.
pub const FILE_IGNORE_PATTERNS: &str = "file_ignore_patterns";

/// Slot under `site` holding the compiled matcher list.
pub const COMPILED_FILE_IGNORE_PATTERNS: &str = "compiled_file_ignore_patterns";

/// Compile a pattern list into matchers, preserving length and order.
///
/// Entries that are already compiled matchers pass through unchanged, so
/// compiling an already-compiled list is a no-op producing an equal list.
pub fn compile_patterns(entries: &[Value]) -> Result<Vec<Value>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Pattern(_) => Ok(entry.clone()),
            Value::String(raw) => RegexBuilder::new(raw)
                .case_insensitive(true)
                .build()
                .map(Value::Pattern)
                .map_err(|err| Error::PatternCompile {
                    index,
                    reason: format!("`{raw}`: {err}"),
                }),
            other => Err(Error::PatternCompile {
                index,
                reason: format!(
                    "expected a pattern string or compiled matcher, found {}",
                    other.type_name()
                ),
            }),
        })
        .collect()
}

/// Recompute `site.compiled_file_ignore_patterns` from the source list.
///
/// A missing source list compiles to an empty list; a source slot holding
/// anything but a list is a configuration error.
pub fn finalize_ignore_patterns(site: &mut Store) -> Result<()> {
    let sources = match site.try_get(FILE_IGNORE_PATTERNS) {
        None => Vec::new(),
        Some(Value::List(entries)) => entries.clone(),
        Some(other) => {
            return Err(Error::PatternCompile {
                index: 0,
                reason: format!(
                    "site.{FILE_IGNORE_PATTERNS} must be a list, found {}",
                    other.type_name()
                ),
            });
        }
    };
    let compiled = compile_patterns(&sources)?;
    site.set(COMPILED_FILE_IGNORE_PATTERNS, Value::List(compiled))?;
    Ok(())
}
