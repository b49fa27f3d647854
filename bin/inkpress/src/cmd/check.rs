//! Check command - validate configuration and templates

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use inkpress_core::{Config, TemplateConfig};
use inkpress_template::TemplateRegistry;

use super::template_dir;

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates the configuration and every template in the configured template directory.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and templates");

    let result = validate(config_path);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

fn validate(config_path: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let templates = match Config::load_with_env(config_path) {
        Ok(config) => {
            println!("  ✓ Configuration valid");
            check_config_values(&config, &mut result);
            config.templates
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            TemplateConfig::default()
        }
    };
    let dir = template_dir(config_path, &templates);
    let extension = templates.extension;

    println!("\nChecking templates...");
    if !dir.is_dir() {
        result.add_warning(format!(
            "Template directory does not exist: {}",
            dir.display()
        ));
        return result;
    }

    let mut registry = TemplateRegistry::new();
    match registry.load_dir(&dir, &extension) {
        Ok(0) => result.add_warning(format!(
            "No *.{extension} templates found in {}",
            dir.display()
        )),
        Ok(count) => println!("  Found {count} template(s)"),
        Err(e) => {
            result.add_error(format!("Failed to load templates: {e}"));
            return result;
        }
    }

    let failures = registry.validate_all();
    for name in registry.names() {
        match failures.iter().find(|(failed, _)| failed == name) {
            Some((_, err)) => {
                println!("  ✗ {name}");
                result.add_error(format!("{name}: {err}"));
            }
            None => println!("  ✓ {name}"),
        }
    }

    result
}

fn check_config_values(config: &Config, result: &mut ValidationResult) {
    if config.site.description.is_none() {
        result.add_warning("site.description is not set");
    }

    if !config.site.base_url.starts_with("http://") && !config.site.base_url.starts_with("https://")
    {
        result.add_warning(format!(
            "site.base_url should be an absolute http(s) URL: {}",
            config.site.base_url
        ));
    }
}
