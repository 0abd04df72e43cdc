//! Template resolution for endpoint URL and body templates.
//!
//! Each configuration field that accepts a template is resolved here
//! into a parsed, executable [`Template`] backed by minijinja. A
//! template slot can be fed from an inline string or from a file on
//! disk; an unused slot resolves to `None`.
//!
//! # Example
//!
//! ```
//! use alertpost::template;
//! use serde_json::json;
//!
//! let tmpl = template::resolve(Some("http://{{ host }}/alert"), None)
//!     .unwrap()
//!     .unwrap();
//! let url = tmpl.render(json!({"host": "db-01"})).unwrap();
//! assert_eq!(url, "http://db-01/alert");
//! ```

use crate::error::TemplateError;
use minijinja::value::Value;
use minijinja::{Environment, ErrorKind, UndefinedBehavior};
use serde::Serialize;
use std::path::Path;

/// Name templates are registered under in their environment.
const TEMPLATE_NAME: &str = "body";

/// A parsed, executable template bound to its own environment.
///
/// Parsing happens at construction; rendering never mutates the
/// template, so a `Template` handed off to the delivery path is safe to
/// share behind a reference.
pub struct Template {
    env: Environment<'static>,
    source: String,
}

impl Template {
    /// Parse an inline template source.
    ///
    /// Inline templates get the `json` and `jsonCompact` helper
    /// functions registered.
    ///
    /// # Errors
    /// Returns [`TemplateError::Syntax`] naming the source text if the
    /// template does not parse.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        Self::build(helper_environment(), source.to_string()).map_err(|e| {
            TemplateError::Syntax {
                source_text: source.to_string(),
                message: e.to_string(),
            }
        })
    }

    /// Parse template source read from `path`. Runs with the base
    /// environment only: the json helpers are registered for inline
    /// sources, not file sources.
    fn parse_file(path: &Path, contents: String) -> Result<Self, TemplateError> {
        Self::build(base_environment(), contents).map_err(|e| TemplateError::FileSyntax {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn build(mut env: Environment<'static>, source: String) -> Result<Self, minijinja::Error> {
        env.add_template_owned(TEMPLATE_NAME, source.clone())?;
        Ok(Self { env, source })
    }

    /// Render the template with the given data.
    ///
    /// Missing fields render as empty strings; runtime failures such as
    /// calls to unknown functions surface as [`TemplateError::Render`].
    pub fn render<S: Serialize>(&self, data: S) -> Result<String, TemplateError> {
        let template =
            self.env
                .get_template(TEMPLATE_NAME)
                .map_err(|e| TemplateError::Render {
                    message: e.to_string(),
                })?;
        template.render(data).map_err(|e| TemplateError::Render {
            message: e.to_string(),
        })
    }

    /// Render with no input data at all.
    ///
    /// Used to probe a template before alert data exists: output
    /// identical to [`source`](Self::source) means the template carries
    /// no substitution directives.
    pub fn render_empty(&self) -> Result<String, TemplateError> {
        self.render(serde_json::json!({}))
    }

    /// The original template source text.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Template")
            .field("source", &self.source)
            .finish()
    }
}

/// Resolve a template slot from an inline source or a file path.
///
/// Exactly one of three outcomes:
/// - `Ok(Some(template))` when an inline source or file path is given
///   (inline wins when both are set);
/// - `Ok(None)` when neither is given, meaning the slot is unused;
/// - `Err` when the file cannot be read or the source does not parse.
pub fn resolve(
    inline: Option<&str>,
    file: Option<&Path>,
) -> Result<Option<Template>, TemplateError> {
    if let Some(source) = inline {
        tracing::debug!("template source: inline");
        return Template::parse(source).map(Some);
    }
    if let Some(path) = file {
        tracing::debug!(path = %path.display(), "template source: file");
        let contents = std::fs::read_to_string(path).map_err(|e| TemplateError::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        return Template::parse_file(path, contents).map(Some);
    }
    Ok(None)
}

fn base_environment() -> Environment<'static> {
    let mut env = Environment::new();
    // Missing fields render as empty strings instead of erroring, so a
    // URL template can be probed without fabricating alert data.
    env.set_undefined_behavior(UndefinedBehavior::Lenient);
    env
}

/// Base environment plus the fixed helper-function table.
fn helper_environment() -> Environment<'static> {
    let mut env = base_environment();
    env.add_function("json", json);
    env.add_function("jsonCompact", json_compact);
    env
}

/// `json(value)`: serialize a value as JSON text, with the trailing
/// newline of stream encoders.
fn json(value: Value) -> Result<String, minijinja::Error> {
    let mut text = encode(&value)?;
    text.push('\n');
    Ok(text)
}

/// `jsonCompact(value)`: JSON text with insignificant whitespace
/// removed and no trailing newline.
fn json_compact(value: Value) -> Result<String, minijinja::Error> {
    encode(&value)
}

fn encode(value: &Value) -> Result<String, minijinja::Error> {
    serde_json::to_string(value).map_err(|e| {
        minijinja::Error::new(ErrorKind::InvalidOperation, "value is not serializable to JSON")
            .with_source(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolve_without_sources_returns_none() {
        let resolved = resolve(None, None).unwrap();
        assert!(resolved.is_none());
    }

    #[test]
    fn inline_template_renders_with_data() {
        let tmpl = resolve(Some("http://{{ host }}/alert"), None)
            .unwrap()
            .unwrap();
        let rendered = tmpl.render(json!({"host": "db-01"})).unwrap();
        assert_eq!(rendered, "http://db-01/alert");
        assert_eq!(tmpl.source(), "http://{{ host }}/alert");
    }

    #[test]
    fn inline_template_missing_field_renders_empty() {
        let tmpl = Template::parse("host={{ host }}").unwrap();
        let rendered = tmpl.render_empty().unwrap();
        assert_eq!(rendered, "host=");
    }

    #[test]
    fn literal_template_renders_unchanged() {
        let tmpl = Template::parse("http://example.com").unwrap();
        assert_eq!(tmpl.render_empty().unwrap(), tmpl.source());
    }

    #[test]
    fn inline_syntax_error_names_source_text() {
        let err = resolve(Some("{% if unclosed"), None).unwrap_err();
        match err {
            TemplateError::Syntax { source_text, .. } => {
                assert_eq!(source_text, "{% if unclosed");
            }
            e => panic!("expected Syntax, got {e:?}"),
        }
    }

    #[test]
    fn json_helper_appends_newline() {
        let tmpl = Template::parse("{{ json(payload) }}").unwrap();
        let rendered = tmpl.render(json!({"payload": {"a": 1}})).unwrap();
        assert_eq!(rendered, "{\"a\":1}\n");
    }

    #[test]
    fn json_compact_helper_has_no_trailing_newline() {
        let tmpl = Template::parse("{{ jsonCompact(payload) }}").unwrap();
        let rendered = tmpl.render(json!({"payload": {"a": 1}})).unwrap();
        assert_eq!(rendered, "{\"a\":1}");
    }

    #[test]
    fn json_helpers_handle_scalars() {
        let tmpl = Template::parse("{{ jsonCompact(value) }}").unwrap();
        let rendered = tmpl.render(json!({"value": "needs \"quoting\""})).unwrap();
        assert_eq!(rendered, "\"needs \\\"quoting\\\"\"");
    }

    #[test]
    fn file_template_parses_and_renders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("row.tmpl");
        std::fs::write(&path, "row: {{ value }}").unwrap();

        let tmpl = resolve(None, Some(&path)).unwrap().unwrap();
        let rendered = tmpl.render(json!({"value": 7})).unwrap();
        assert_eq!(rendered, "row: 7");
    }

    #[test]
    fn file_read_error_names_path() {
        let err = resolve(None, Some(Path::new("/nonexistent/alert.tmpl"))).unwrap_err();
        match err {
            TemplateError::FileRead { path, .. } => {
                assert_eq!(path, "/nonexistent/alert.tmpl");
            }
            e => panic!("expected FileRead, got {e:?}"),
        }
    }

    #[test]
    fn file_syntax_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.tmpl");
        std::fs::write(&path, "{% for x %}").unwrap();

        let err = resolve(None, Some(&path)).unwrap_err();
        match err {
            TemplateError::FileSyntax { path: reported, .. } => {
                assert_eq!(reported, path.display().to_string());
            }
            e => panic!("expected FileSyntax, got {e:?}"),
        }
    }

    // json/jsonCompact are only registered for inline sources; a
    // file-sourced template referencing them parses but fails at render
    // time. Known inconsistency, kept until the owners decide whether
    // to unify helper registration across both sources.
    #[test]
    fn file_template_has_no_json_helpers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alert.tmpl");
        std::fs::write(&path, "{{ json(payload) }}").unwrap();

        let tmpl = resolve(None, Some(&path)).unwrap().unwrap();
        let err = tmpl.render(json!({"payload": {"a": 1}})).unwrap_err();
        assert!(matches!(err, TemplateError::Render { .. }));
    }

    #[test]
    fn inline_source_wins_over_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ignored.tmpl");
        std::fs::write(&path, "from file").unwrap();

        let tmpl = resolve(Some("from inline"), Some(&path)).unwrap().unwrap();
        assert_eq!(tmpl.render_empty().unwrap(), "from inline");
    }
}
