//! Declarative endpoint configuration types and loading.

use super::secret::SecretString;
use super::validation::{UrlTemplate, classify_url_template};
use crate::error::{ConfigError, TemplateError};
use crate::template::{self, Template};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use url::Url;

/// Basic-auth credentials attached to an endpoint.
///
/// Auth is optional for an endpoint, but once given it must be complete:
/// both `username` and `password` set. A partially-filled value is an
/// error state, not a degraded mode; [`valid`](Self::valid) is the
/// check downstream consumers run before building an auth header.
#[derive(Clone)]
pub struct BasicAuth {
    /// Username for the `Authorization` header.
    pub username: String,
    /// Password (never exposed in logs).
    pub password: SecretString,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into()),
        }
    }

    /// True when both username and password are set.
    pub fn valid(&self) -> bool {
        !self.username.is_empty() && !self.password.expose().is_empty()
    }

    /// # Errors
    /// Returns [`ConfigError::IncompleteBasicAuth`] unless both
    /// parameters are set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.valid() {
            return Err(ConfigError::IncompleteBasicAuth);
        }
        Ok(())
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl<'de> Deserialize<'de> for BasicAuth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Missing keys default to empty so a partial fill deserializes
        // and is caught by valid(), not by an opaque serde error.
        #[derive(Deserialize)]
        struct RawBasicAuth {
            #[serde(default)]
            username: String,
            #[serde(default)]
            password: String,
        }

        let raw = RawBasicAuth::deserialize(deserializer)?;
        Ok(BasicAuth {
            username: raw.username,
            password: SecretString::new(raw.password),
        })
    }
}

/// Configuration for a single HTTP POST delivery endpoint.
///
/// `url` is itself a template: a literal URL or a string with
/// substitution directives filled from alert data at delivery time.
/// The alert and row body templates may each come from an inline string
/// or a file, never both.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Unique endpoint name, used as the lookup key.
    #[serde(default)]
    pub endpoint: String,
    /// Templated target URL.
    #[serde(default)]
    pub url: String,
    /// Static headers attached to every request.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Optional basic-auth credentials.
    #[serde(default)]
    pub basic_auth: Option<BasicAuth>,
    /// Inline alert body template.
    #[serde(default)]
    pub alert_template: Option<String>,
    /// Alert body template file (absolute path).
    #[serde(default)]
    pub alert_template_file: Option<PathBuf>,
    /// Inline per-row template.
    #[serde(default)]
    pub row_template: Option<String>,
    /// Per-row template file (absolute path).
    #[serde(default)]
    pub row_template_file: Option<PathBuf>,
}

impl Config {
    /// Ensure the configuration can safely be turned into an
    /// [`Endpoint`](super::Endpoint).
    ///
    /// Checks run in order; the first violation is returned. A literal
    /// URL is syntax-checked here, a templated one only at delivery
    /// time once real alert data exists.
    ///
    /// # Errors
    /// See [`ConfigError`] for the violations reported per field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.is_empty() {
            return Err(ConfigError::MissingField { field: "endpoint" });
        }
        if self.url.is_empty() {
            return Err(ConfigError::MissingField { field: "url" });
        }

        if let UrlTemplate::Static(rendered) = classify_url_template(&self.url)? {
            Url::parse(&rendered).map_err(|e| ConfigError::InvalidUrl {
                url: rendered.clone(),
                message: e.to_string(),
            })?;
        }

        if self.alert_template.is_some() && self.alert_template_file.is_some() {
            return Err(ConfigError::ConflictingFields {
                first: "alert-template",
                second: "alert-template-file",
            });
        }
        if let Some(path) = &self.alert_template_file
            && !path.is_absolute()
        {
            return Err(ConfigError::RelativePath {
                field: "alert-template-file",
                path: path.display().to_string(),
            });
        }

        if self.row_template.is_some() && self.row_template_file.is_some() {
            return Err(ConfigError::ConflictingFields {
                first: "row-template",
                second: "row-template-file",
            });
        }
        if let Some(path) = &self.row_template_file
            && !path.is_absolute()
        {
            return Err(ConfigError::RelativePath {
                field: "row-template-file",
                path: path.display().to_string(),
            });
        }

        Ok(())
    }

    /// Resolve the alert body template from its inline or file source.
    pub fn resolve_alert_template(&self) -> Result<Option<Template>, TemplateError> {
        template::resolve(
            self.alert_template.as_deref(),
            self.alert_template_file.as_deref(),
        )
    }

    /// Resolve the per-row template from its inline or file source.
    pub fn resolve_row_template(&self) -> Result<Option<Template>, TemplateError> {
        template::resolve(
            self.row_template.as_deref(),
            self.row_template_file.as_deref(),
        )
    }

    /// Resolve the URL template. `None` when `url` is empty.
    pub fn resolve_url_template(&self) -> Result<Option<Template>, TemplateError> {
        template::resolve((!self.url.is_empty()).then_some(self.url.as_str()), None)
    }
}

/// Ordered collection of endpoint configurations.
///
/// Order is preserved from the configuration file but only matters for
/// iteration: validation reports the first failing entry, and indexing
/// lets later entries overwrite earlier ones with the same name.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(transparent)]
pub struct Configs(Vec<Config>);

impl Configs {
    pub fn new(configs: Vec<Config>) -> Self {
        Self(configs)
    }

    /// Load a collection from a YAML file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Load`] if the file cannot be read and
    /// [`ConfigError::Parse`] if the YAML is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate every member, stopping at the first failure.
    ///
    /// # Errors
    /// Propagates the first [`ConfigError`] any member produces.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for config in &self.0 {
            config.validate()?;
        }
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Config> {
        self.0.iter()
    }
}

impl std::ops::Deref for Configs {
    type Target = [Config];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Config>> for Configs {
    fn from(configs: Vec<Config>) -> Self {
        Self(configs)
    }
}
