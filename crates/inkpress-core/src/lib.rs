//! Inkpress Core Library
//!
//! Configuration and error handling shared by the Inkpress crates.

pub mod config;
pub mod error;

pub use config::{Config, SiteConfig, TemplateConfig};
pub use error::{CoreError, Result};
