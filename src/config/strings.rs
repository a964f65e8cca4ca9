//! Language pack loading for display labels.
//!
//! A language pack is a flat TOML table of `key = "text"` pairs. The English
//! pack ships inside the binary; others are read from disk. Field labels use
//! the keyword [`HIDDEN`] to switch a field off for the whole site.

use crate::errors::{Error, Result};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Label value that removes a field from every screen.
pub const HIDDEN: &str = "hidden";

const ENGLISH_PACK: &str = include_str!("../../lang/en.toml");

/// Resolved strings for one language.
#[derive(Debug, Clone, Default)]
pub struct Strings {
    entries: HashMap<String, String>,
}

impl Strings {
    /// The built-in English pack.
    pub fn english() -> Result<Self> {
        Self::from_toml_str(ENGLISH_PACK)
    }

    /// Parses a pack from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let entries: HashMap<String, String> =
            toml::from_str(contents).map_err(|e| Error::Strings {
                message: format!("Failed to parse language pack: {e}"),
            })?;
        Ok(Self { entries })
    }

    /// Loads a pack from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        debug!("Loading language pack from {:?}", path_ref);
        let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Strings {
            message: format!("Failed to read language pack {}: {e}", path_ref.display()),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Overrides one string, mostly useful for site customisation and tests.
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Looks up a string; unknown keys come back as `[[key]]`.
    #[must_use]
    pub fn get(&self, key: &str) -> Cow<'_, str> {
        self.entries.get(key).map_or_else(
            || Cow::Owned(format!("[[{key}]]")),
            |value| Cow::Borrowed(value.as_str()),
        )
    }

    /// Whether the label for `key` is the [`HIDDEN`] keyword.
    #[must_use]
    pub fn is_hidden(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(|value| value == HIDDEN)
    }
}
