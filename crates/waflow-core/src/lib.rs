//! Waflow Core - WhatsApp Cloud API request construction
//!
//! Pure payload-construction engine for the WhatsApp Business Cloud API:
//! the resource/operation model, the per-item field bag, credentials, and
//! the builder that maps an operation plus its fields to a fully-determined
//! request specification. Nothing in this crate touches the network.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builder;
pub mod credentials;
pub mod error;
pub mod params;
pub mod request;
pub mod resource;
pub mod schema;
pub mod types;

pub use error::{Error, Result};

// Re-export the builder entry point
pub use builder::build;

// Re-export the data model
pub use credentials::Credentials;
pub use params::Params;
pub use request::{HttpMethod, RequestSpec};
pub use resource::{Operation, Resource};
pub use types::{
    Button, ListItem, ListSection, ProductSection, TemplateComponent, TemplateVariable,
};
