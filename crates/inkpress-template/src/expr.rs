//! Parsing and evaluation of the expressions inside `{{ ... }}` tags.
//!
//! Grammar:
//!
//! ```text
//! expression := path ["?"] ("|" filter)*
//! filter     := name [":" argument ("," argument)*]
//! argument   := string | integer | float | "true" | "false" | "nil" | "null" | path
//! path       := segment ("." segment)*
//! ```

use crate::{
    context::TemplateContext,
    error::{Result, TemplateError},
    filter::FilterRegistry,
    value::Value,
};

/// A parsed output expression.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Expression {
    pub(crate) path: String,
    pub(crate) optional: bool,
    pub(crate) filters: Vec<FilterCall>,
}

/// One `| name: args` stage of a filter pipeline.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FilterCall {
    pub(crate) name: String,
    pub(crate) args: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Argument {
    Literal(Value),
    Variable(String),
}

impl Expression {
    pub(crate) fn parse(source: &str) -> Result<Self> {
        let mut stages = split_unquoted(source, '|')?.into_iter();
        let head = stages.next().unwrap_or_default().trim();
        if head.is_empty() {
            return Err(TemplateError::InvalidSyntax(format!(
                "empty expression in {{{{ {} }}}}",
                source.trim()
            )));
        }

        let (path, optional) = match head.strip_suffix('?') {
            Some(stripped) => (stripped.trim_end(), true),
            None => (head, false),
        };
        check_path(path)?;

        let filters = stages
            .map(|stage| FilterCall::parse(stage.trim()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            path: path.to_string(),
            optional,
            filters,
        })
    }

    /// Resolve the variable and run it through the filter pipeline.
    pub(crate) fn evaluate(
        &self,
        context: &TemplateContext,
        filters: &FilterRegistry,
    ) -> Result<Value> {
        let mut value = match context.get(&self.path) {
            Some(value) => value.clone(),
            None if self.optional => Value::Nil,
            None => return Err(TemplateError::MissingVariable(self.path.clone())),
        };

        for call in &self.filters {
            let args: Vec<Value> = call
                .args
                .iter()
                .map(|arg| match arg {
                    Argument::Literal(value) => value.clone(),
                    Argument::Variable(path) => context.get(path).cloned().unwrap_or_default(),
                })
                .collect();
            value = filters.apply(&call.name, &value, &args)?;
        }

        Ok(value)
    }
}

impl FilterCall {
    fn parse(stage: &str) -> Result<Self> {
        let (name, args) = match stage.split_once(':') {
            Some((name, args)) => (name.trim(), Some(args)),
            None => (stage, None),
        };

        if !is_identifier(name) {
            return Err(TemplateError::InvalidSyntax(format!(
                "invalid filter name `{name}`"
            )));
        }

        let args = match args {
            None => Vec::new(),
            Some(raw) if raw.trim().is_empty() => {
                return Err(TemplateError::InvalidSyntax(format!(
                    "filter `{name}` expects arguments after `:`"
                )));
            }
            Some(raw) => split_unquoted(raw, ',')?
                .into_iter()
                .map(|arg| Argument::parse(arg.trim()))
                .collect::<Result<Vec<_>>>()?,
        };

        Ok(Self {
            name: name.to_string(),
            args,
        })
    }
}

impl Argument {
    fn parse(source: &str) -> Result<Self> {
        if source.is_empty() {
            return Err(TemplateError::InvalidSyntax(
                "empty filter argument".to_string(),
            ));
        }

        if source.starts_with(['"', '\'']) {
            return parse_string(source).map(|s| Self::Literal(Value::String(s)));
        }

        let literal = match source {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            "nil" | "null" => Some(Value::Nil),
            _ => None,
        };
        if let Some(value) = literal {
            return Ok(Self::Literal(value));
        }

        let numeric = source
            .strip_prefix('-')
            .unwrap_or(source)
            .starts_with(|c: char| c.is_ascii_digit());
        if numeric {
            if let Ok(i) = source.parse::<i64>() {
                return Ok(Self::Literal(Value::Integer(i)));
            }
            return source
                .parse::<f64>()
                .map(|f| Self::Literal(Value::Float(f)))
                .map_err(|_| TemplateError::InvalidSyntax(format!("invalid number `{source}`")));
        }

        check_path(source)?;
        Ok(Self::Variable(source.to_string()))
    }
}

/// Split on `sep` wherever it appears outside a quoted string.
fn split_unquoted(source: &str, sep: char) -> Result<Vec<&str>> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in source.char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == sep => {
                parts.push(&source[start..i]);
                start = i + c.len_utf8();
            }
            None => {}
        }
    }

    if quote.is_some() {
        return Err(TemplateError::InvalidSyntax(format!(
            "unterminated string literal in `{}`",
            source.trim()
        )));
    }

    parts.push(&source[start..]);
    Ok(parts)
}

fn parse_string(source: &str) -> Result<String> {
    let mut chars = source.chars();
    let quote = chars.next().unwrap_or('"');
    let mut out = String::new();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(escaped @ ('\\' | '"' | '\'')) => out.push(escaped),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => break,
            },
            c if c == quote => {
                let rest = chars.as_str();
                if !rest.trim().is_empty() {
                    return Err(TemplateError::InvalidSyntax(format!(
                        "unexpected `{rest}` after string literal"
                    )));
                }
                return Ok(out);
            }
            c => out.push(c),
        }
    }

    Err(TemplateError::InvalidSyntax(format!(
        "unterminated string literal {source}"
    )))
}

fn check_path(path: &str) -> Result<()> {
    if path.split('.').all(is_path_segment) {
        Ok(())
    } else {
        Err(TemplateError::InvalidSyntax(format!(
            "invalid variable name `{path}`"
        )))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn is_path_segment(segment: &str) -> bool {
    is_identifier(segment) || (!segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()))
}
