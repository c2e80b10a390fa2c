//! Client for the Washington State Ferries REST API.
//!
//! Resolves service endpoints, authenticates them with the API access code,
//! repairs the API's `/Date(ms-offset)/` timestamps and classifies every
//! response into a single [`wsf::Outcome`].

pub mod config;
pub mod datefix;
pub mod endpoint;
pub mod error;
pub mod wsf;

pub use config::{ClientConfig, ClientOptions};
pub use endpoint::Params;
pub use error::{ConfigError, TransportError, WsfError};
pub use wsf::{Outcome, Payload, Service, WsfClient};
