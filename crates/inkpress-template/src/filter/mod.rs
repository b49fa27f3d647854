//! Template filters and the registry that resolves them by name.

pub mod join;

use std::{collections::HashMap, fmt};

pub use join::{DEFAULT_GLUE, JoinFilter, flatten_once, join};

use crate::{
    error::{Result, TemplateError},
    value::Value,
};

/// A named transformation invoked from template markup as `{{ value | name: arg }}`.
pub trait Filter: Send + Sync {
    /// Name the filter is registered under.
    fn name(&self) -> &str;

    /// Apply the filter to `input` with the already-resolved arguments.
    fn apply(&self, input: &Value, args: &[Value]) -> Result<Value>;
}

/// A filter backed by a closure.
pub struct FnFilter<F> {
    name: String,
    func: F,
}

impl<F> FnFilter<F>
where
    F: Fn(&Value, &[Value]) -> Result<Value> + Send + Sync,
{
    /// Wrap `func` as a filter called `name`.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Filter for FnFilter<F>
where
    F: Fn(&Value, &[Value]) -> Result<Value> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, input: &Value, args: &[Value]) -> Result<Value> {
        (self.func)(input, args)
    }
}

/// Registry of filters available to templates.
pub struct FilterRegistry {
    filters: HashMap<String, Box<dyn Filter>>,
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("filters", &self.names())
            .finish()
    }
}

impl FilterRegistry {
    /// Create a registry with the built-in filters.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(JoinFilter);
        registry
    }

    /// Create a registry with no filters at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            filters: HashMap::new(),
        }
    }

    /// Register a filter, replacing any filter with the same name.
    pub fn register(&mut self, filter: impl Filter + 'static) {
        let name = filter.name().to_string();
        if self.filters.insert(name.clone(), Box::new(filter)).is_some() {
            tracing::debug!(filter = %name, "Replaced existing filter");
        }
    }

    /// Register a closure as a filter.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, func: F)
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.register(FnFilter::new(name, func));
    }

    /// Get a filter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Filter> {
        self.filters.get(name).map(Box::as_ref)
    }

    /// Check if a filter is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Registered filter names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Apply the filter registered as `name`.
    pub fn apply(&self, name: &str, input: &Value, args: &[Value]) -> Result<Value> {
        let filter = self
            .get(name)
            .ok_or_else(|| TemplateError::UnknownFilter(name.to_string()))?;
        tracing::trace!(filter = name, args = args.len(), "Applying filter");
        filter.apply(input, args)
    }
}
