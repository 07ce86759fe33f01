//! TOML-backed settings sources
//!
//! Default settings and the user override are TOML documents whose
//! top-level tables name the namespaces they bind into (see
//! [`Bindings`]). The defaults are mandatory; the override is the optional,
//! last-applied input that takes precedence over every earlier stage.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::registry::NamespaceRegistry;

use super::bindings::Bindings;

/// Supplies the mandatory built-in default settings (stage 1).
pub trait DefaultSettings {
    /// Produce the default bindings. Any failure here is fatal to the
    /// pipeline; there is no running without defaults.
    fn load(&mut self) -> Result<Bindings>;
}

/// Supplies the optional user override (stage 5).
pub trait OverrideSource {
    /// Produce the override bindings, or `None` when the source is absent.
    ///
    /// The registry argument gives read access to everything the earlier
    /// stages wrote.
    fn load(&mut self, registry: &NamespaceRegistry) -> Result<Option<Bindings>>;
}

enum DefaultsInput {
    Inline(String),
    File(PathBuf),
}

/// Default settings read from embedded TOML text or a file on disk.
pub struct TomlDefaults {
    input: DefaultsInput,
}

impl TomlDefaults {
    /// Defaults from embedded TOML text (`include_str!` of the built-in
    /// default settings, typically).
    pub fn inline(content: impl Into<String>) -> Self {
        Self {
            input: DefaultsInput::Inline(content.into()),
        }
    }

    /// Defaults from a TOML file on disk.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            input: DefaultsInput::File(path.into()),
        }
    }
}

impl DefaultSettings for TomlDefaults {
    fn load(&mut self) -> Result<Bindings> {
        let content = match &self.input {
            DefaultsInput::Inline(text) => text.clone(),
            DefaultsInput::File(path) => {
                fs::read_to_string(path).map_err(|err| Error::DefaultsLoad {
                    reason: format!("{}: {err}", path.display()),
                })?
            }
        };
        let table: toml::Table = toml::from_str(&content).map_err(|err| Error::DefaultsLoad {
            reason: err.to_string(),
        })?;
        Bindings::from_table(&table)
    }
}

/// User override read from a TOML file.
///
/// Two lookup modes:
/// - [`optional`](Self::optional): a missing or unreadable file is skipped
///   silently and the pipeline runs without an override.
/// - [`required`](Self::required): a missing file is `ConfigNotFound`, the
///   interactive-init flow where the caller asked for a specific source
///   directory. Once the file exists, an unreadable file still degrades to
///   "absent".
///
/// In both modes a file that parses incorrectly is fatal: present but
/// malformed is a user error, not an absence.
pub struct TomlOverride {
    path: PathBuf,
    required: bool,
}

impl TomlOverride {
    pub fn optional(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: false,
        }
    }

    pub fn required(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OverrideSource for TomlOverride {
    fn load(&mut self, _registry: &NamespaceRegistry) -> Result<Option<Bindings>> {
        if self.required && !self.path.is_file() {
            return Err(Error::ConfigNotFound {
                path: self.path.clone(),
            });
        }
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) => {
                tracing::debug!(
                    path = %self.path.display(),
                    error = %err,
                    "user override not readable, running without it"
                );
                return Ok(None);
            }
        };
        let table: toml::Table = toml::from_str(&content).map_err(|err| Error::OverrideLoad {
            path: self.path.display().to_string(),
            reason: err.to_string(),
        })?;
        Ok(Some(Bindings::from_table(&table)?))
    }
}
