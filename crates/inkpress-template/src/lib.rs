//! Inkpress Template Library
//!
//! Template values, filters and rendering for Inkpress.
//!
//! # Modules
//!
//! - [`value`] - Values that flow through templates and filters
//! - [`filter`] - The filter registry and the built-in `join` filter
//! - [`context`] - Variables available during rendering
//! - [`template`] - Template parsing, rendering and the template registry
//!
//! # Example
//!
//! ```
//! use inkpress_template::{Template, TemplateContext};
//!
//! let template = Template::new("post", "Tagged {{ tags | join: \", \" }}");
//! let ctx = TemplateContext::new().with_var("tags", vec!["rust", "web"]);
//! assert_eq!(template.render(&ctx).unwrap(), "Tagged rust, web");
//! ```

pub mod context;
pub mod error;
mod expr;
pub mod filter;
pub mod template;
pub mod value;

pub use context::TemplateContext;
pub use error::{Result, TemplateError};
pub use filter::{DEFAULT_GLUE, Filter, FilterRegistry, JoinFilter, join};
pub use template::{Template, TemplateRegistry};
pub use value::Value;
