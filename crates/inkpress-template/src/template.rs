//! Template system for page generation.
//!
//! Provides a lightweight Liquid-style template system using string interpolation with
//! filter pipelines, rather than a full template engine. Tags have the form
//! `{{ variable }}`, `{{ variable? }}` for optional values, and
//! `{{ variable | filter: arg, ... }}`.

use std::{
    collections::HashMap,
    path::{Component, Path},
};

use walkdir::WalkDir;

use crate::{
    context::TemplateContext,
    error::{Result, TemplateError},
    expr::Expression,
    filter::FilterRegistry,
};

/// A piece of template source.
#[derive(Debug)]
enum Segment<'a> {
    Text(&'a str),
    Output(Expression),
}

/// A simple template that supports variable interpolation and filters.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    /// Create a new template with the given name and content.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Get the template name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the raw template source.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Render the template with the built-in filters.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        self.render_with(context, &FilterRegistry::new())
    }

    /// Render the template, resolving filters from `filters`.
    pub fn render_with(
        &self,
        context: &TemplateContext,
        filters: &FilterRegistry,
    ) -> Result<String> {
        let mut output = String::with_capacity(self.content.len());

        for segment in self.segments()? {
            match segment {
                Segment::Text(text) => output.push_str(text),
                Segment::Output(expr) => {
                    let value = expr.evaluate(context, filters)?;
                    output.push_str(&value.to_string());
                }
            }
        }

        Ok(output)
    }

    /// Check syntax and filter names without rendering.
    pub fn validate(&self, filters: &FilterRegistry) -> Result<()> {
        for segment in self.segments()? {
            if let Segment::Output(expr) = segment {
                if let Some(call) = expr.filters.iter().find(|c| !filters.contains(&c.name)) {
                    return Err(TemplateError::UnknownFilter(call.name.clone()));
                }
            }
        }
        Ok(())
    }

    fn segments(&self) -> Result<Vec<Segment<'_>>> {
        let mut segments = Vec::new();
        let mut rest = self.content.as_str();

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Text(&rest[..start]));
            }

            let inner = &rest[start + 2..];
            let end = find_close(inner)
                .ok_or_else(|| TemplateError::InvalidSyntax("unclosed {{ delimiter".to_string()))?;

            segments.push(Segment::Output(Expression::parse(&inner[..end])?));
            rest = &inner[end + 2..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Text(rest));
        }

        Ok(segments)
    }
}

/// Byte offset of the `}}` closing a tag, skipping any inside quoted arguments.
fn find_close(inner: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut chars = inner.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '}' && chars.peek().is_some_and(|&(_, next)| next == '}') => {
                return Some(i);
            }
            None => {}
        }
    }

    None
}

/// Registry of named templates sharing one set of filters.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
    filters: FilterRegistry,
}

impl TemplateRegistry {
    /// Create an empty registry with the built-in filters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry that resolves filters from `filters`.
    #[must_use]
    pub fn with_filters(filters: FilterRegistry) -> Self {
        Self {
            templates: HashMap::new(),
            filters,
        }
    }

    /// Register a template.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    /// Get a template by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Registered template names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Filters available to templates in this registry.
    #[must_use]
    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    /// Mutable access to the filters, for registering custom ones.
    pub fn filters_mut(&mut self) -> &mut FilterRegistry {
        &mut self.filters
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        template.render_with(context, &self.filters)
    }

    /// Validate every template, returning the failures by template name.
    pub fn validate_all(&self) -> Vec<(String, TemplateError)> {
        let mut failures: Vec<(String, TemplateError)> = self
            .templates
            .values()
            .filter_map(|t| t.validate(&self.filters).err().map(|e| (t.name.clone(), e)))
            .collect();
        failures.sort_by(|a, b| a.0.cmp(&b.0));
        failures
    }

    /// Load every `*.{extension}` file below `dir`.
    ///
    /// Templates are named by their path relative to `dir` without the extension, using
    /// `/` separators (`layouts/post.html` becomes `layouts/post`). Returns the number
    /// of templates loaded.
    pub fn load_dir(&mut self, dir: &Path, extension: &str) -> Result<usize> {
        let mut loaded = 0;

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != extension)
            {
                continue;
            }

            let name = template_name(dir, path);
            let content = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
                path: path.to_path_buf(),
                source,
            })?;

            tracing::debug!(template = %name, path = %path.display(), "Loaded template");
            self.register(Template::new(name, content));
            loaded += 1;
        }

        tracing::info!(dir = %dir.display(), loaded, "Loaded templates");
        Ok(loaded)
    }
}

fn template_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path).with_extension("");
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
