//! CLI command implementations.

pub mod check;
pub mod filters;
pub mod render;

use std::path::{Path, PathBuf};

use inkpress_core::TemplateConfig;

/// Directory holding the configured templates, relative to the config file.
pub(crate) fn template_dir(config_path: &Path, templates: &TemplateConfig) -> PathBuf {
    config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(&templates.dir)
}
