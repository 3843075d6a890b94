use serde::{Serialize, Serializer};
use serde_yaml::Value;

use crate::config::{ConfigStore, value_kind};

/// Maintainer label used when the project document does not name one.
pub const DEFAULT_MAINTAINER: &str = "Your teammate";

/// Values bound into the Dockerfile template.
///
/// This is the closed set of variables a template can reference. It is built
/// from a [`ConfigStore`] by [`from_config()`](Self::from_config), which is the
/// point where document values are checked; the template engine never sees
/// raw document values. Absent optional values serialize as empty strings so
/// every field is defined inside the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderContext {
    /// Service name (`name`)
    #[serde(serialize_with = "empty_if_none")]
    pub name: Option<String>,
    /// Command the container starts with (`startup_command`)
    #[serde(serialize_with = "empty_if_none")]
    pub startup_command: Option<String>,
    /// Maintainer label (`maintainer`, defaults to [`DEFAULT_MAINTAINER`])
    pub maintainer: String,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            name: None,
            startup_command: None,
            maintainer: DEFAULT_MAINTAINER.to_owned(),
        }
    }
}

impl RenderContext {
    /// Build a context from the recognized keys of a project document.
    ///
    /// Strings, numbers and booleans are taken in their textual form and a
    /// `null` value counts as absent. Keys the context does not know are
    /// ignored.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidField`](crate::Error::InvalidField) if a recognized key
    /// is bound to a list, mapping or tagged value.
    pub fn from_config(store: &ConfigStore) -> crate::Result<Self> {
        let name = scalar_text("name", store.lookup("name"))?;
        let startup_command = scalar_text("startup_command", store.lookup("startup_command"))?;
        let maintainer = scalar_text("maintainer", store.lookup("maintainer"))?
            // arch-lint: allow(no-silent-result-drop) reason="absent maintainer takes the default label"
            .unwrap_or_else(|| DEFAULT_MAINTAINER.to_owned());

        let ignored: Vec<&str> = store
            .keys()
            .filter(|k| !matches!(*k, "name" | "startup_command" | "maintainer"))
            .collect();
        if !ignored.is_empty() {
            tracing::debug!(keys = ?ignored, "project document keys not used by the template context");
        }

        Ok(Self {
            name,
            startup_command,
            maintainer,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_startup_command(mut self, command: impl Into<String>) -> Self {
        self.startup_command = Some(command.into());
        self
    }

    pub fn with_maintainer(mut self, maintainer: impl Into<String>) -> Self {
        self.maintainer = maintainer.into();
        self
    }
}

fn empty_if_none<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    // arch-lint: allow(no-silent-result-drop) reason="absent optional renders as an empty string"
    serializer.serialize_str(value.as_deref().unwrap_or_default())
}

fn scalar_text(key: &str, value: Option<&Value>) -> crate::Result<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(crate::Error::InvalidField {
            key: key.to_owned(),
            reason: format!("expected a string, found {}", value_kind(other)),
        }),
    }
}
