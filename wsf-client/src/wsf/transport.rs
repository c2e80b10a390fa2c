//! HTTP transport seam.
//!
//! The dispatcher describes each call as a [`RequestDescriptor`] and hands it
//! to a [`Transport`]. [`HttpTransport`] performs the I/O with reqwest; tests
//! substitute [`MockTransport`](super::MockTransport).

use std::future::Future;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::config::ClientConfig;
use crate::error::{ConfigError, TransportError};

/// A single outbound call, built immediately before dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: String,
    /// Whether the payload goes through date repair before parsing
    pub fix_dates: bool,
}

/// An HTTP response as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Create a response with no headers.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// First value of the named header (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A failed exchange, with whatever part of the response arrived.
#[derive(Debug)]
pub struct TransportFailure {
    pub error: TransportError,
    pub response: Option<HttpResponse>,
}

impl From<TransportError> for TransportFailure {
    fn from(error: TransportError) -> Self {
        Self {
            error,
            response: None,
        }
    }
}

/// Sends one request and returns the raw response text.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: &RequestDescriptor,
    ) -> impl Future<Output = Result<HttpResponse, TransportFailure>> + Send;
}

/// reqwest-backed transport.
///
/// Default headers and the timeout come from the [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport from the configured headers and timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();

        for (name, value) in &config.headers {
            let invalid = |message: String| ConfigError::InvalidHeader {
                name: name.clone(),
                message,
            };
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
            let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
            headers.insert(header_name, header_value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ConfigError::Client)?;

        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<HttpResponse, TransportFailure> {
        let response = self
            .http
            .request(request.method.clone(), request.url.as_str())
            .send()
            .await
            .map_err(TransportError::from)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        match response.text().await {
            Ok(body) => Ok(HttpResponse {
                status,
                headers,
                body,
            }),
            Err(e) => Err(TransportFailure {
                error: e.into(),
                response: Some(HttpResponse {
                    status,
                    headers,
                    body: String::new(),
                }),
            }),
        }
    }
}
