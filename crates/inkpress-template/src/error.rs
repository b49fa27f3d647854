//! Template error types.

use std::path::PathBuf;

use thiserror::Error;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable: {0}")]
    MissingVariable(String),

    /// Template not found.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Invalid template syntax.
    #[error("invalid template syntax: {0}")]
    InvalidSyntax(String),

    /// No filter registered under this name.
    #[error("unknown filter: {0}")]
    UnknownFilter(String),

    /// A filter was called with arguments it cannot use.
    #[error("invalid arguments for filter `{filter}`: {message}")]
    FilterArgs { filter: String, message: String },

    /// Reading a template from disk failed.
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking a template directory failed.
    #[error("failed to walk template directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// YAML or JSON context data could not be parsed.
    #[error("invalid YAML context data: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML context data could not be parsed.
    #[error("invalid TOML context data: {0}")]
    Toml(#[from] toml::de::Error),
}

impl TemplateError {
    /// Create a filter argument error.
    pub fn filter_args(filter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FilterArgs {
            filter: filter.into(),
            message: message.into(),
        }
    }
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;
