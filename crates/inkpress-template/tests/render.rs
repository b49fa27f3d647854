//! Integration tests rendering templates loaded from disk.

use std::fs;

use inkpress_template::{TemplateContext, TemplateError, TemplateRegistry, Value};

fn write(dir: &std::path::Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, content).expect("write template");
}

#[test]
fn test_load_dir_names_templates_by_relative_path() {
    let dir = tempfile::tempdir().expect("create temp dir");
    write(dir.path(), "index.html", "{{ site.title }}");
    write(dir.path(), "layouts/post.html", "{{ page.title }}");
    write(dir.path(), "notes.txt", "not a template");

    let mut registry = TemplateRegistry::new();
    let loaded = registry.load_dir(dir.path(), "html").expect("load templates");

    assert_eq!(loaded, 2);
    assert_eq!(registry.names(), ["index", "layouts/post"]);
}

#[test]
fn test_render_post_with_yaml_front_matter() {
    let dir = tempfile::tempdir().expect("create temp dir");
    write(
        dir.path(),
        "post.html",
        r#"<h1>{{ page.title }}</h1>
<p class="tags">{{ page.tags | join: " · " }}</p>
<meta name="keywords" content="{{ page.keywords | join }}">
<p>{{ page.subtitle? }}</p>"#,
    );

    let mut registry = TemplateRegistry::new();
    registry.load_dir(dir.path(), "html").expect("load templates");

    let ctx = TemplateContext::from_yaml_str(
        r#"
page:
  title: Shipping a filter
  tags: [rust, templates]
  keywords: [[static, site], generator]
"#,
    )
    .expect("parse context");

    let html = registry.render("post", &ctx).expect("render");
    assert_eq!(
        html,
        r#"<h1>Shipping a filter</h1>
<p class="tags">rust · templates</p>
<meta name="keywords" content="static,site,generator">
<p></p>"#
    );
}

#[test]
fn test_join_scalar_front_matter_value() {
    let mut registry = TemplateRegistry::new();
    registry.register(inkpress_template::Template::new(
        "byline",
        "by {{ authors | join: \" & \" }}",
    ));

    let single = TemplateContext::new().with_var("authors", "Sam");
    assert_eq!(registry.render("byline", &single).unwrap(), "by Sam");

    let many = TemplateContext::new().with_var("authors", vec!["Sam", "Alex"]);
    assert_eq!(registry.render("byline", &many).unwrap(), "by Sam & Alex");
}

#[test]
fn test_glue_from_context_variable() {
    let mut registry = TemplateRegistry::new();
    registry.register(inkpress_template::Template::new(
        "list",
        "{{ items | join: site.separator }}",
    ));

    let ctx = TemplateContext::from_toml_str(
        r#"
items = [1, 2, 3]

[site]
separator = " / "
"#,
    )
    .expect("parse context");

    assert_eq!(registry.render("list", &ctx).unwrap(), "1 / 2 / 3");
}

#[test]
fn test_doubly_nested_list_is_flattened_once() {
    let mut registry = TemplateRegistry::new();
    registry.register(inkpress_template::Template::new(
        "nested",
        "{{ items | join: \";\" }}",
    ));

    let items = Value::from(vec![
        Value::from(vec![Value::from("a"), Value::from(vec!["b", "c"])]),
        Value::from("d"),
    ]);
    let ctx = TemplateContext::new().with_var("items", items);

    assert_eq!(
        registry.render("nested", &ctx).unwrap(),
        r#"a;["b", "c"];d"#
    );
}

#[test]
fn test_unknown_filter_fails_render() {
    let mut registry = TemplateRegistry::new();
    registry.register(inkpress_template::Template::new("t", "{{ x | sitemap }}"));

    let ctx = TemplateContext::new().with_var("x", "y");
    let result = registry.render("t", &ctx);
    assert!(matches!(result, Err(TemplateError::UnknownFilter(_))));
}

#[test]
fn test_load_dir_missing_directory() {
    let mut registry = TemplateRegistry::new();
    let result = registry.load_dir(std::path::Path::new("/nonexistent/templates"), "html");
    assert!(matches!(result, Err(TemplateError::Walk(_))));
}
