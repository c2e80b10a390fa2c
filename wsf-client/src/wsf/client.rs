//! WSF REST client and request dispatcher.
//!
//! Every call resolves its endpoint, goes through the transport once, and
//! is classified into exactly one [`Outcome`]. There are no retries.

use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::datefix;
use crate::endpoint::{self, Params};
use crate::error::WsfError;

use super::outcome::{Outcome, Payload};
use super::transport::{HttpResponse, HttpTransport, RequestDescriptor, Transport};

/// WSF REST API client.
///
/// Cheap to clone; clones share the configuration and the transport.
#[derive(Debug)]
pub struct WsfClient<T = HttpTransport> {
    transport: Arc<T>,
    config: Arc<ClientConfig>,
}

impl<T> Clone for WsfClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            config: Arc::clone(&self.config),
        }
    }
}

impl WsfClient<HttpTransport> {
    /// Create a new client that talks HTTP with reqwest.
    pub fn new(config: ClientConfig) -> Result<Self, WsfError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> WsfClient<T> {
    /// Create a client over a custom transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            config: Arc::new(config),
        }
    }

    /// The effective configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request descriptor for a call without sending it.
    pub fn describe(
        &self,
        method: Method,
        service: Option<&str>,
        path: &str,
        params: &Params,
    ) -> RequestDescriptor {
        RequestDescriptor {
            method,
            url: endpoint::resolve(path, service, params, &self.config),
            fix_dates: self.config.fix_dates,
        }
    }

    /// Send one request and classify the result.
    ///
    /// Pass `()` as `params` to call an endpoint without parameters.
    pub async fn request(
        &self,
        method: Method,
        service: Option<&str>,
        path: &str,
        params: impl Into<Params>,
    ) -> Outcome {
        let request = self.describe(method, service, path, &params.into());
        debug!(
            method = %request.method,
            service = service.unwrap_or("rest"),
            path,
            "dispatching WSF request"
        );

        let outcome = match self.transport.send(&request).await {
            Ok(response) => interpret(response, request.fix_dates),
            Err(failure) => {
                warn!(
                    service = service.unwrap_or("rest"),
                    path,
                    error = %failure.error,
                    "WSF transport failed"
                );
                Outcome::TransportFailure {
                    error: failure.error.into(),
                    response: failure.response,
                }
            }
        };

        debug!(
            status = outcome.response().map(|r| r.status),
            outcome = outcome.kind(),
            "WSF request completed"
        );
        outcome
    }

    /// Send one request and report it through `callback`, which is invoked
    /// exactly once with `(error, data, response)`.
    pub async fn request_with<F>(
        &self,
        method: Method,
        service: Option<&str>,
        path: &str,
        params: impl Into<Params>,
        callback: F,
    ) where
        F: FnOnce(Option<WsfError>, Payload, Option<HttpResponse>),
    {
        let (error, data, response) = self
            .request(method, service, path, params)
            .await
            .into_parts();
        callback(error, data, response);
    }

    /// `GET` an endpoint of a service.
    pub async fn get(&self, service: &str, path: &str, params: impl Into<Params>) -> Outcome {
        self.request(Method::GET, Some(service), path, params).await
    }
}

/// Parse a received body, repairing dates first if asked, and classify it.
fn interpret(response: HttpResponse, fix_dates: bool) -> Outcome {
    let parsed = if fix_dates {
        serde_json::from_str::<Value>(&datefix::repair(&response.body))
    } else {
        serde_json::from_str::<Value>(&response.body)
    };

    match parsed {
        Ok(data) => Outcome::classify(data, response),
        Err(source) => {
            warn!(status = response.status, error = %source, "WSF response is not valid JSON");
            Outcome::ParseFailure {
                error: WsfError::Parse {
                    status: response.status,
                    source,
                },
                response,
            }
        }
    }
}
