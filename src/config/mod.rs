//! Endpoint configuration: declarative types, validation, and indexing.
//!
//! One [`Config`] describes one outbound webhook: where to POST, how to
//! authenticate, and how to render the alert body and per-row data.
//! A [`Configs`] collection validates its members and builds the
//! name-to-[`Endpoint`] lookup table consumed by the delivery path.

mod runtime;
mod secret;
mod types;
mod validation;

// Re-exports publics
pub use runtime::Endpoint;
pub use secret::SecretString;
pub use types::{BasicAuth, Config, Configs};
pub use validation::{UrlTemplate, classify_url_template};
