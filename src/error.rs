//! Centralized error types for alertpost using thiserror.
//!
//! Every error carries enough context (endpoint name, field name,
//! offending path or source text) to be directly actionable by the
//! operator editing the configuration. Nothing is logged-and-swallowed:
//! all failures propagate to the caller.

use thiserror::Error;

/// Errors related to template resolution and rendering.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("failed to parse template \"{source_text}\": {message}")]
    Syntax { source_text: String, message: String },
    #[error("failed to parse template from file '{path}': {message}")]
    FileSyntax { path: String, message: String },
    #[error("failed to read template file '{path}': {message}")]
    FileRead { path: String, message: String },
    #[error("template render failed: {message}")]
    Render { message: String },
}

/// Errors related to endpoint configuration loading, validation, and
/// indexing.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load config file: {0}")]
    Load(String),
    #[error("invalid configuration: {0}")]
    Parse(String),
    #[error("must specify {field}")]
    MissingField { field: &'static str },
    #[error("must specify only one of {first} and {second}")]
    ConflictingFields {
        first: &'static str,
        second: &'static str,
    },
    #[error("must use an absolute path for {field}: '{path}'")]
    RelativePath { field: &'static str, path: String },
    #[error("invalid URL template syntax \"{source_text}\": {message}")]
    InvalidUrlTemplate {
        source_text: String,
        message: String,
    },
    #[error("invalid URL \"{url}\": {message}")]
    InvalidUrl { url: String, message: String },
    #[error("basic-auth must set both \"username\" and \"password\" parameters")]
    IncompleteBasicAuth,
    #[error("failed to resolve {field} for endpoint \"{endpoint}\": {source}")]
    ResolveTemplate {
        endpoint: String,
        field: &'static str,
        #[source]
        source: TemplateError,
    },
}
