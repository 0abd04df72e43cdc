//! URL template classification.

use crate::error::ConfigError;
use crate::template::Template;

/// A URL template classified by whether its rendered form depends on
/// alert data.
#[derive(Debug)]
pub enum UrlTemplate {
    /// No substitution directives: the source already is the final URL
    /// and can be syntax-checked ahead of time.
    Static(String),
    /// Contains substitution directives; the final URL is only known at
    /// render time, so no URL-syntax check is possible yet.
    Dynamic(Template),
}

/// Parse a URL template and classify it by rendering with no input
/// data: output byte-identical to the source means the template carries
/// no directives.
///
/// # Errors
/// Returns [`ConfigError::InvalidUrlTemplate`] when the source does not
/// parse or fails the probe render.
pub fn classify_url_template(source: &str) -> Result<UrlTemplate, ConfigError> {
    let template = Template::parse(source).map_err(|e| ConfigError::InvalidUrlTemplate {
        source_text: source.to_string(),
        message: e.to_string(),
    })?;
    let rendered = template
        .render_empty()
        .map_err(|e| ConfigError::InvalidUrlTemplate {
            source_text: source.to_string(),
            message: e.to_string(),
        })?;

    if rendered == source {
        Ok(UrlTemplate::Static(rendered))
    } else {
        Ok(UrlTemplate::Dynamic(template))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn literal_url_is_static() {
        match classify_url_template("http://example.com").unwrap() {
            UrlTemplate::Static(url) => assert_eq!(url, "http://example.com"),
            t => panic!("expected Static, got {t:?}"),
        }
    }

    #[test]
    fn templated_url_is_dynamic() {
        match classify_url_template("http://{{ host }}:9093/alert").unwrap() {
            UrlTemplate::Dynamic(template) => {
                let url = template.render(json!({"host": "db-01"})).unwrap();
                assert_eq!(url, "http://db-01:9093/alert");
            }
            t => panic!("expected Dynamic, got {t:?}"),
        }
    }

    #[test]
    fn syntax_error_reports_invalid_url_template() {
        let err = classify_url_template("http://{{ host").unwrap_err();
        match err {
            ConfigError::InvalidUrlTemplate { source_text, .. } => {
                assert_eq!(source_text, "http://{{ host");
            }
            e => panic!("expected InvalidUrlTemplate, got {e:?}"),
        }
    }

    #[test]
    fn render_failure_reports_invalid_url_template() {
        // Unknown functions only fail once the probe render runs.
        let err = classify_url_template("http://{{ hostname() }}").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrlTemplate { .. }));
    }
}
