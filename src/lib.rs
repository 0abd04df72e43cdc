// src/lib.rs
//! Alertpost - HTTP POST endpoint configuration for alert delivery.
//!
//! Turns declarative webhook configuration into validated, ready-to-use
//! endpoint definitions with pre-parsed URL and body templates:
//! ```text
//! config::Configs::load -> Configs::validate -> Configs::index -> delivery
//! ```
//! The delivery path itself (HTTP client, scheduling) lives in the
//! surrounding alerting engine, not in this crate.

pub mod config;
pub mod error;
pub mod template;

// Re-export commonly used types
pub use config::{BasicAuth, Config, Configs, Endpoint, SecretString, UrlTemplate};
pub use error::{ConfigError, TemplateError};
pub use template::Template;
