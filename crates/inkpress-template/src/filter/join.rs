//! The `join` filter.
//!
//! Joins a scalar or a list into one delimited string:
//!
//! ```text
//! {{ page.tags | join: ", " }}
//! ```
//!
//! The input is treated as a one-element list when it is a scalar, then flattened by
//! exactly one level, so `[["a", "b"], "c"]` joins like `["a", "b", "c"]`. Lists nested
//! any deeper are not flattened further and render in their default string form.

use super::Filter;
use crate::{
    error::{Result, TemplateError},
    value::Value,
};

/// Separator used when no glue is given.
pub const DEFAULT_GLUE: &str = ",";

/// Normalize `input` into the flat sequence of elements `join` concatenates.
pub fn flatten_once(input: &Value) -> Vec<&Value> {
    match input {
        Value::Array(items) => items
            .iter()
            .flat_map(|item| match item {
                Value::Array(inner) => inner.as_slice(),
                other => std::slice::from_ref(other),
            })
            .collect(),
        scalar => vec![scalar],
    }
}

/// Join `input` with `glue` between consecutive elements.
///
/// `None` uses [`DEFAULT_GLUE`].
pub fn join(input: &Value, glue: Option<&str>) -> String {
    let glue = glue.unwrap_or(DEFAULT_GLUE);
    flatten_once(input)
        .iter()
        .map(|element| element.to_string())
        .collect::<Vec<_>>()
        .join(glue)
}

/// Template adapter for [`join`]. Takes an optional glue argument.
#[derive(Debug, Clone, Copy, Default)]
pub struct JoinFilter;

impl Filter for JoinFilter {
    fn name(&self) -> &str {
        "join"
    }

    fn apply(&self, input: &Value, args: &[Value]) -> Result<Value> {
        let glue = match args {
            [] | [Value::Nil] => None,
            [glue] => Some(glue.to_string()),
            _ => {
                return Err(TemplateError::filter_args(
                    self.name(),
                    format!("expected at most 1 argument, got {}", args.len()),
                ));
            }
        };

        Ok(Value::String(join(input, glue.as_deref())))
    }
}
