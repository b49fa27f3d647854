//! Inkpress CLI Library
//!
//! Command implementations for the Inkpress template renderer. The binary entry point
//! lives in `main.rs`.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (render, check, filters)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use inkpress::cmd;
//!
//! // Render a template with a YAML data file to stdout
//! let args = cmd::render::RenderArgs {
//!     template: Path::new("templates/post.html"),
//!     data: Some(Path::new("data/post.yaml")),
//!     vars: &[],
//!     output: None,
//! };
//! cmd::render::run(Path::new("inkpress.toml"), &args).unwrap();
//! ```

pub mod cmd;

pub use inkpress_core::Config;
pub use inkpress_template::{FilterRegistry, Template, TemplateContext, TemplateRegistry};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
