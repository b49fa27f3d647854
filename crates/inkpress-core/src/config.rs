//! Site configuration management.

use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for Inkpress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Template lookup settings.
    #[serde(default)]
    pub templates: TemplateConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Base URL for the site (e.g., "https://example.com").
    pub base_url: String,

    /// Site description for meta tags.
    #[serde(default)]
    pub description: Option<String>,

    /// Site author name.
    #[serde(default)]
    pub author: Option<String>,
}

/// Template configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Directory holding the site's templates.
    #[serde(default = "default_template_dir")]
    pub dir: String,

    /// File extension of template files, without the leading dot.
    #[serde(default = "default_template_extension")]
    pub extension: String,
}

fn default_template_dir() -> String {
    "templates".to_string()
}

fn default_template_extension() -> String {
    "html".to_string()
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            dir: default_template_dir(),
            extension: default_template_extension(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `INKPRESS__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .add_source(config::Environment::with_prefix("INKPRESS").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.base_url.is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        if self.templates.extension.starts_with('.') {
            return Err(CoreError::config(
                "templates.extension must not start with a dot",
            ));
        }

        Ok(())
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Site values exposed to every template under the `site` variable.
    ///
    /// Unset optional fields are left out so templates can test for them with `?`.
    pub fn site_context_vars(&self) -> BTreeMap<String, String> {
        let mut vars = BTreeMap::new();
        vars.insert("title".to_string(), self.site.title.clone());
        vars.insert(
            "base_url".to_string(),
            self.site.base_url.trim_end_matches('/').to_string(),
        );
        if let Some(description) = &self.site.description {
            vars.insert("description".to_string(), description.clone());
        }
        if let Some(author) = &self.site.author {
            vars.insert("author".to_string(), author.clone());
        }
        vars
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Write, sync::Mutex};

    use super::*;

    /// Serializes tests that read `INKPRESS__*` environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn create_test_config() -> String {
        r#"
[site]
title = "Test Site"
base_url = "https://example.com"
description = "Notes and posts"
author = "Sam"

[templates]
dir = "layouts"
extension = "liquid"
"#
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("inkpress.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.title, "Test Site");
        assert_eq!(config.site.base_url, "https://example.com");
        assert_eq!(config.site.description.as_deref(), Some("Notes and posts"));
        assert_eq!(config.site.author.as_deref(), Some("Sam"));
        assert_eq!(config.templates.dir, "layouts");
        assert_eq!(config.templates.extension, "liquid");
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("inkpress.toml");
        let minimal_config = r#"
[site]
title = "Minimal Site"
base_url = "https://example.com"
"#;
        std::fs::write(&config_path, minimal_config).expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert!(config.site.description.is_none());
        assert_eq!(config.templates.dir, "templates");
        assert_eq!(config.templates.extension, "html");
    }

    #[test]
    fn test_load_with_env_reads_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("inkpress.toml");
        std::fs::write(&config_path, create_test_config()).expect("write");

        let config = Config::load_with_env(&config_path).expect("load config");
        assert_eq!(config.site.title, "Test Site");
        assert_eq!(config.templates.dir, "layouts");
    }

    #[test]
    fn test_load_with_env_override_wins() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("inkpress.toml");
        std::fs::write(&config_path, create_test_config()).expect("write");

        // SAFETY: ENV_LOCK keeps other config tests from reading the environment meanwhile.
        unsafe { std::env::set_var("INKPRESS__SITE__TITLE", "Env Title") };
        let result = Config::load_with_env(&config_path);
        unsafe { std::env::remove_var("INKPRESS__SITE__TITLE") };

        let config = result.expect("load config");
        assert_eq!(config.site.title, "Env Title");
        assert_eq!(config.site.base_url, "https://example.com");
    }

    #[test]
    fn test_load_with_env_accepts_any_extension() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("site.conf");
        std::fs::write(&config_path, create_test_config()).expect("write");

        let from_env = Config::load_with_env(&config_path).expect("load with env");
        let plain = Config::load(&config_path).expect("load");
        assert_eq!(from_env.site.title, plain.site.title);
        assert_eq!(from_env.templates.dir, "layouts");
    }

    #[test]
    fn test_url_for() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("inkpress.toml");
        let config_content = r#"
[site]
title = "Test"
base_url = "https://example.com/"
"#;
        std::fs::write(&config_path, config_content).expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(
            config.url_for("/posts/hello"),
            "https://example.com/posts/hello"
        );
        assert_eq!(
            config.url_for("posts/hello"),
            "https://example.com/posts/hello"
        );
    }

    #[test]
    fn test_site_context_vars() {
        let config: Config = toml::from_str(
            r#"
[site]
title = "Test"
base_url = "https://example.com/"
author = "Sam"
"#,
        )
        .expect("parse");

        let vars = config.site_context_vars();
        assert_eq!(vars.get("title").map(String::as_str), Some("Test"));
        assert_eq!(
            vars.get("base_url").map(String::as_str),
            Some("https://example.com")
        );
        assert_eq!(vars.get("author").map(String::as_str), Some("Sam"));
        assert!(!vars.contains_key("description"));
    }

    #[test]
    fn test_config_validation_empty_title() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("inkpress.toml");
        let config_content = r#"
[site]
title = ""
base_url = "https://example.com"
"#;
        std::fs::write(&config_path, config_content).expect("write");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("title cannot be empty")
        );
    }

    #[test]
    fn test_config_validation_dotted_extension() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("inkpress.toml");
        let config_content = r#"
[site]
title = "Test"
base_url = "https://example.com"

[templates]
extension = ".html"
"#;
        std::fs::write(&config_path, config_content).expect("write");

        let err = Config::load(&config_path).unwrap_err();
        assert!(err.to_string().contains("must not start with a dot"));
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/inkpress.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }
}
