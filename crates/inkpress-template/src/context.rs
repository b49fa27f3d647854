//! Variables available while rendering a template.

use std::collections::{BTreeMap, HashMap};

use crate::{error::Result, value::Value};

/// Template context with variables for interpolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, Value>,
}

impl TemplateContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from a YAML (or JSON) mapping.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Ok(Self::new());
        }
        let variables: HashMap<String, Value> = serde_yaml::from_str(source)?;
        Ok(Self { variables })
    }

    /// Build a context from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(source)?;
        let variables = table
            .into_iter()
            .map(|(key, value)| (key, Value::from(value)))
            .collect();
        Ok(Self { variables })
    }

    /// Insert a variable into the context.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Insert a value at a dotted path, creating intermediate maps as needed.
    ///
    /// `site.title` overrides only the `title` key of an existing `site` map. A
    /// non-map value found along the path is replaced by a map.
    pub fn insert_path(&mut self, path: &str, value: impl Into<Value>) {
        let (head, rest) = path.split_once('.').unwrap_or((path, ""));
        if rest.is_empty() {
            self.insert(head, value);
            return;
        }

        let mut current = self.variables.entry(head.to_string()).or_default();
        for segment in rest.split('.') {
            if !matches!(current, Value::Map(_)) {
                *current = Value::Map(BTreeMap::new());
            }
            let Value::Map(map) = current else {
                unreachable!("replaced with a map above");
            };
            current = map.entry(segment.to_string()).or_default();
        }
        *current = value.into();
    }

    /// Create context with initial variables.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a variable by name or dotted path (`page.tags`, `page.tags.0`).
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let (head, rest) = path.split_once('.').unwrap_or((path, ""));
        self.variables.get(head)?.get_path(rest)
    }

    /// Check if a variable exists.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Copy every variable of `other` into this context, overwriting on conflict.
    pub fn extend(&mut self, other: TemplateContext) {
        self.variables.extend(other.variables);
    }

    /// Number of top-level variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether the context has no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
