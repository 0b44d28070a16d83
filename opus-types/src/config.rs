//! Configuration accessor.
//!
//! Registries and plugins read their few tunables through [`ConfigAccessor`]
//! using dotted keys (`"model.field_descriptor"`, `"urn.nid"`). The default
//! implementation, [`RepositoryConfig`], is backed by a TOML document.

use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Key lookup over the repository configuration.
pub trait ConfigAccessor: Send + Sync {
    /// Returns the value stored under a dotted key, rendered as a string.
    fn get(&self, key: &str) -> Option<String>;

    /// Returns the list stored under a dotted key.
    ///
    /// The default implementation splits a scalar value on commas.
    fn get_list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// TOML-backed configuration.
#[derive(Debug, Clone, Default)]
pub struct RepositoryConfig {
    table: toml::Table,
    source: Option<PathBuf>,
}

impl RepositoryConfig {
    /// Creates an empty configuration; every lookup yields nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> crate::Result<Self> {
        let table = contents
            .parse::<toml::Table>()
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        Ok(Self {
            table,
            source: None,
        })
    }

    /// Loads a configuration file.
    /// Falls back to an empty configuration with a warning on read or parse errors.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config file found at {:?}, using defaults", path);
            return Self::empty();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(mut config) => {
                    info!("Loaded repository config from {:?}", path);
                    config.source = Some(path.to_path_buf());
                    config
                }
                Err(e) => {
                    warn!(
                        "Failed to parse config file {:?}: {}. Falling back to defaults.",
                        path, e
                    );
                    Self {
                        table: toml::Table::new(),
                        source: Some(path.to_path_buf()),
                    }
                }
            },
            Err(e) => {
                warn!("Failed to read config file {:?}: {}", path, e);
                Self {
                    table: toml::Table::new(),
                    source: Some(path.to_path_buf()),
                }
            }
        }
    }

    /// Path of the file this configuration was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Sets a string value under a dotted key, creating intermediate tables.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let mut parts: Vec<&str> = key.split('.').collect();
        let Some(leaf) = parts.pop() else {
            return;
        };

        let mut table = &mut self.table;
        for part in parts {
            let entry = table
                .entry(part.to_string())
                .or_insert(toml::Value::Table(toml::Table::new()));
            if !entry.is_table() {
                *entry = toml::Value::Table(toml::Table::new());
            }
            table = match entry.as_table_mut() {
                Some(t) => t,
                None => return,
            };
        }
        table.insert(leaf.to_string(), toml::Value::String(value.into()));
    }

    fn lookup(&self, key: &str) -> Option<&toml::Value> {
        let mut parts = key.split('.');
        let first = parts.next()?;
        let mut value = self.table.get(first)?;
        for part in parts {
            value = value.as_table()?.get(part)?;
        }
        Some(value)
    }
}

fn render(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl ConfigAccessor for RepositoryConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.lookup(key).map(render)
    }

    fn get_list(&self, key: &str) -> Vec<String> {
        match self.lookup(key) {
            Some(toml::Value::Array(items)) => items.iter().map(render).collect(),
            Some(other) => render(other)
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        }
    }
}
