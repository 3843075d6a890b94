use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

/// Project document read when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "project.yaml";

/// Syntax of a project document, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// `.toml` selects TOML; everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }

    fn parse(self, content: &str) -> Result<Value, String> {
        match self {
            Self::Yaml if content.trim().is_empty() => Ok(Value::Null),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yaml => f.write_str("YAML"),
            Self::Toml => f.write_str("TOML"),
        }
    }
}

/// Top-level key/value view over one project document.
///
/// The store starts out unloaded and becomes loaded after a successful
/// [`load()`](Self::load). Lookups never fail: an unloaded store, or one whose
/// last load failed, answers every lookup as if the document were empty.
///
/// # Examples
///
/// ```no_run
/// use dockgen_core::ConfigStore;
/// use serde_yaml::Value;
///
/// let store = ConfigStore::open("project.yaml").unwrap();
/// let maintainer = store.get("maintainer", Value::from("Your teammate"));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    document: Mapping,
    loaded: bool,
}

impl ConfigStore {
    /// Create an unloaded store bound to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            document: Mapping::new(),
            loaded: false,
        }
    }

    /// Create a store and load it immediately.
    pub fn open(path: impl Into<PathBuf>) -> crate::Result<Self> {
        let mut store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    /// Document path the store is bound to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Read and parse the document at the bound path.
    ///
    /// An empty or `null` document loads as an empty mapping.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`](crate::Error::NotFound) if the path does not exist
    /// - [`Error::ConfigRead`](crate::Error::ConfigRead) if the file cannot be read
    /// - [`Error::ConfigParse`](crate::Error::ConfigParse) if the content is malformed
    /// - [`Error::NotAMapping`](crate::Error::NotAMapping) if the top level is a scalar or list
    pub fn load(&mut self) -> crate::Result<()> {
        self.document = Mapping::new();
        self.loaded = false;

        if !self.path.exists() {
            return Err(crate::Error::NotFound {
                path: self.path.clone(),
            });
        }

        let content =
            std::fs::read_to_string(&self.path).map_err(|e| crate::Error::ConfigRead {
                path: self.path.clone(),
                source: e,
            })?;

        let format = DocumentFormat::from_path(&self.path);
        let value = format
            .parse(&content)
            .map_err(|detail| crate::Error::ConfigParse {
                path: self.path.clone(),
                format,
                detail,
            })?;

        self.document = match value {
            Value::Null => Mapping::new(),
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(crate::Error::NotAMapping {
                    path: self.path.clone(),
                    found: value_kind(&other),
                });
            }
        };
        self.loaded = true;

        tracing::debug!(
            path = %self.path.display(),
            %format,
            keys = self.document.len(),
            "project document loaded"
        );
        Ok(())
    }

    /// Value bound to `key`, or `default` when absent.
    pub fn get(&self, key: &str, default: Value) -> Value {
        // arch-lint: allow(no-silent-result-drop) reason="absent key takes the caller's default"
        self.lookup(key).cloned().unwrap_or(default)
    }

    /// Value bound to `key`, if any. Only top-level keys are matched.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        if !self.loaded {
            tracing::warn!(
                path = %self.path.display(),
                key,
                "lookup on a project document that is not loaded; using defaults"
            );
        }
        self.document.get(key)
    }

    /// Top-level string keys of the loaded document, in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.document.keys().filter_map(Value::as_str)
    }
}

/// Human-readable name of a YAML value's kind, for error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
