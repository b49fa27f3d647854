//! Render command - renders one template file

use std::{fs, path::Path};

use color_eyre::eyre::{Result, WrapErr, bail};
use inkpress_core::{Config, CoreError};
use inkpress_template::{FilterRegistry, Template, TemplateContext, Value};

/// Inputs for a single render.
#[derive(Debug)]
pub struct RenderArgs<'a> {
    /// Template file to render.
    pub template: &'a Path,
    /// Optional YAML, JSON or TOML data file.
    pub data: Option<&'a Path>,
    /// `KEY=VALUE` overrides, applied last. Dotted keys set nested values.
    pub vars: &'a [String],
    /// Output file. Rendered output goes to stdout when unset.
    pub output: Option<&'a Path>,
}

/// Run the render command.
pub fn run(config_path: &Path, args: &RenderArgs<'_>) -> Result<()> {
    tracing::info!(?config_path, template = ?args.template, data = ?args.data, "Rendering template");

    let mut context = TemplateContext::new();

    if config_path.exists() {
        let config =
            Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
        context.insert("site", Value::from(config.site_context_vars()));
    } else {
        tracing::debug!(?config_path, "No configuration file, rendering without site variables");
    }

    if let Some(data) = args.data {
        context.extend(load_data(data)?);
    }

    for var in args.vars {
        let (key, value) = parse_var(var)?;
        context.insert_path(key, value);
    }

    let source = fs::read_to_string(args.template)
        .wrap_err_with(|| format!("Failed to read template {}", args.template.display()))?;
    let name = args
        .template
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let template = Template::new(name, source);

    let rendered = template
        .render_with(&context, &FilterRegistry::new())
        .wrap_err_with(|| format!("Failed to render {}", args.template.display()))?;

    match args.output {
        Some(output) => {
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(output, &rendered)
                .wrap_err_with(|| format!("Failed to write {}", output.display()))?;
            tracing::info!(?output, bytes = rendered.len(), "Wrote rendered template");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

/// Load a data file into a context, choosing the format by extension.
pub fn load_data(path: &Path) -> Result<TemplateContext> {
    let source = fs::read_to_string(path).map_err(CoreError::from)?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    let context = match ext {
        "yaml" | "yml" | "json" => TemplateContext::from_yaml_str(&source),
        "toml" => TemplateContext::from_toml_str(&source),
        other => {
            return Err(CoreError::data(
                path,
                format!(
                    "unsupported data file extension `{other}` (expected yaml, yml, json or toml)"
                ),
            )
            .into());
        }
    };

    context.wrap_err_with(|| format!("Failed to load data from {}", path.display()))
}

/// Split a `KEY=VALUE` override.
pub fn parse_var(var: &str) -> Result<(&str, &str)> {
    match var.split_once('=') {
        Some((key, value)) if is_var_key(key.trim()) => Ok((key.trim(), value)),
        _ => bail!("Invalid variable `{var}`, expected KEY=VALUE"),
    }
}

fn is_var_key(key: &str) -> bool {
    !key.is_empty() && key.split('.').all(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var() {
        assert_eq!(parse_var("title=Hello").unwrap(), ("title", "Hello"));
        assert_eq!(parse_var("sep= = ").unwrap(), ("sep", " = "));
        assert_eq!(parse_var("empty=").unwrap(), ("empty", ""));
        assert!(parse_var("novalue").is_err());
        assert!(parse_var("=value").is_err());
        assert_eq!(parse_var("site.title=X").unwrap(), ("site.title", "X"));
        assert!(parse_var("site..title=X").is_err());
        assert!(parse_var(".title=X").is_err());
    }

    #[test]
    fn test_load_data_by_extension() {
        let dir = tempfile::tempdir().expect("create temp dir");

        let yaml = dir.path().join("post.yaml");
        fs::write(&yaml, "tags: [a, b]\n").expect("write");
        let ctx = load_data(&yaml).expect("load yaml");
        assert_eq!(ctx.get("tags"), Some(&Value::from(vec!["a", "b"])));

        let toml = dir.path().join("post.toml");
        fs::write(&toml, "tags = [\"c\"]\n").expect("write");
        let ctx = load_data(&toml).expect("load toml");
        assert_eq!(ctx.get("tags"), Some(&Value::from(vec!["c"])));

        let txt = dir.path().join("post.txt");
        fs::write(&txt, "tags").expect("write");
        let err = load_data(&txt).unwrap_err();
        assert!(err.to_string().contains("unsupported data file extension"));
    }

    #[test]
    fn test_render_to_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = dir.path().join("inkpress.toml");
        fs::write(
            &config,
            "[site]\ntitle = \"Notes\"\nbase_url = \"https://example.com\"\n",
        )
        .expect("write");

        let template = dir.path().join("post.html");
        fs::write(
            &template,
            "{{ site.title }}: {{ title }} [{{ tags | join: \", \" }}]",
        )
        .expect("write");

        let data = dir.path().join("post.yaml");
        fs::write(&data, "title: Draft\ntags: [[rust, cli], web]\n").expect("write");

        let output = dir.path().join("out/post.html");
        let vars = vec!["title=Final".to_string()];
        let args = RenderArgs {
            template: &template,
            data: Some(&data),
            vars: &vars,
            output: Some(&output),
        };

        run(&config, &args).expect("render");
        let rendered = fs::read_to_string(&output).expect("read output");
        assert_eq!(rendered, "Notes: Final [rust, cli, web]");
    }

    #[test]
    fn test_dotted_var_overrides_site_value() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = dir.path().join("inkpress.toml");
        fs::write(
            &config,
            "[site]\ntitle = \"Notes\"\nbase_url = \"https://example.com\"\n",
        )
        .expect("write");

        let template = dir.path().join("index.html");
        fs::write(&template, "{{ site.title }} @ {{ site.base_url }}").expect("write");

        let output = dir.path().join("index.out");
        let vars = vec!["site.title=Override".to_string()];
        let args = RenderArgs {
            template: &template,
            data: None,
            vars: &vars,
            output: Some(&output),
        };

        run(&config, &args).expect("render");
        let rendered = fs::read_to_string(&output).expect("read output");
        assert_eq!(rendered, "Override @ https://example.com");
    }

    #[test]
    fn test_render_reports_missing_variable() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let template = dir.path().join("post.html");
        fs::write(&template, "{{ title }}").expect("write");
        let output = dir.path().join("post.out");

        let args = RenderArgs {
            template: &template,
            data: None,
            vars: &[],
            output: Some(&output),
        };

        let err = run(&dir.path().join("missing.toml"), &args).unwrap_err();
        assert!(format!("{err:?}").contains("missing required variable: title"));
    }
}
