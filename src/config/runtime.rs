//! Runtime endpoint objects built from validated configuration.

use super::types::{BasicAuth, Configs};
use crate::error::ConfigError;
use crate::template::Template;
use std::collections::HashMap;

/// A ready-to-use delivery endpoint with pre-parsed templates.
///
/// Built once per configuration load and handed to the delivery path as
/// part of an immutable snapshot: nothing here is mutated after
/// construction, so concurrent readers are safe once the map is handed
/// off.
#[derive(Debug)]
pub struct Endpoint {
    url_template: Template,
    headers: HashMap<String, String>,
    basic_auth: Option<BasicAuth>,
    alert_template: Option<Template>,
    row_template: Option<Template>,
}

impl Endpoint {
    pub fn new(
        url_template: Template,
        headers: HashMap<String, String>,
        basic_auth: Option<BasicAuth>,
        alert_template: Option<Template>,
        row_template: Option<Template>,
    ) -> Self {
        Self {
            url_template,
            headers,
            basic_auth,
            alert_template,
            row_template,
        }
    }

    /// Template producing the target URL from alert data.
    pub fn url_template(&self) -> &Template {
        &self.url_template
    }

    /// Static headers attached to every request.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Basic-auth credentials, if configured.
    pub fn basic_auth(&self) -> Option<&BasicAuth> {
        self.basic_auth.as_ref()
    }

    /// Alert body template, if configured.
    pub fn alert_template(&self) -> Option<&Template> {
        self.alert_template.as_ref()
    }

    /// Per-row template, if configured.
    pub fn row_template(&self) -> Option<&Template> {
        self.row_template.as_ref()
    }
}

impl Configs {
    /// Build the endpoint-name lookup table for the delivery path.
    ///
    /// All templates are resolved up front; the first failure aborts
    /// the whole operation, so a partially built map is never returned.
    /// Later entries overwrite earlier ones with the same name.
    ///
    /// # Errors
    /// Returns [`ConfigError::ResolveTemplate`] naming the endpoint and
    /// field whose template failed to resolve.
    pub fn index(&self) -> Result<HashMap<String, Endpoint>, ConfigError> {
        let mut endpoints = HashMap::new();

        for config in self.iter() {
            let alert_template =
                config
                    .resolve_alert_template()
                    .map_err(|e| ConfigError::ResolveTemplate {
                        endpoint: config.endpoint.clone(),
                        field: "alert-template",
                        source: e,
                    })?;
            let row_template =
                config
                    .resolve_row_template()
                    .map_err(|e| ConfigError::ResolveTemplate {
                        endpoint: config.endpoint.clone(),
                        field: "row-template",
                        source: e,
                    })?;
            let url_template = config
                .resolve_url_template()
                .map_err(|e| ConfigError::ResolveTemplate {
                    endpoint: config.endpoint.clone(),
                    field: "url",
                    source: e,
                })?
                .ok_or(ConfigError::MissingField { field: "url" })?;

            tracing::debug!(endpoint = %config.endpoint, "endpoint indexed");
            endpoints.insert(
                config.endpoint.clone(),
                Endpoint::new(
                    url_template,
                    config.headers.clone(),
                    config.basic_auth.clone(),
                    alert_template,
                    row_template,
                ),
            );
        }

        Ok(endpoints)
    }
}
