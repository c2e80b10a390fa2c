//! Washington State Ferries REST client.
//!
//! This module resolves endpoints, dispatches requests through a
//! [`Transport`] and classifies each round trip into an [`Outcome`].
//!
//! Key characteristics of the WSF API:
//! - Each service (fares, schedule, terminals, vessels) lives under its own
//!   base path; the access code travels as the `apiaccesscode` query parameter
//! - Errors may arrive with status 200 in a top-level `errors` field
//! - Dates are serialized as `"\/Date(ms-offset)\/"` strings

mod client;
mod mock;
mod outcome;
mod services;
mod transport;

pub use client::WsfClient;
pub use mock::MockTransport;
pub use outcome::{Outcome, Payload};
pub use services::{
    FARES_PATHS, Fares, SCHEDULE_PATHS, Schedule, Service, TERMINALS_PATHS, Terminals,
    UnknownService, VESSELS_PATHS, Vessels,
};
pub use transport::{HttpResponse, HttpTransport, RequestDescriptor, Transport, TransportFailure};
