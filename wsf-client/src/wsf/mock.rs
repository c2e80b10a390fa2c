//! Mock transport for testing without network access.
//!
//! Serves canned responses keyed by the fully resolved URL and records every
//! request it sees.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::TransportError;

use super::transport::{HttpResponse, RequestDescriptor, Transport, TransportFailure};

/// A canned reply for one URL.
#[derive(Debug, Clone)]
enum Reply {
    Response(HttpResponse),
    Failure {
        message: String,
        response: Option<HttpResponse>,
    },
}

/// Transport that answers from an in-memory table.
///
/// A URL without a canned reply fails like an unreachable host.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    replies: Arc<HashMap<String, Reply>>,
    requests: Arc<RwLock<Vec<RequestDescriptor>>>,
}

impl MockTransport {
    /// Create an empty mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `response`.
    pub fn with_response(mut self, url: impl Into<String>, response: HttpResponse) -> Self {
        Arc::make_mut(&mut self.replies).insert(url.into(), Reply::Response(response));
        self
    }

    /// Fail `url` with `error`, optionally after a partial response.
    pub fn with_failure(
        mut self,
        url: impl Into<String>,
        error: TransportError,
        response: Option<HttpResponse>,
    ) -> Self {
        Arc::make_mut(&mut self.replies).insert(
            url.into(),
            Reply::Failure {
                message: error.to_string(),
                response,
            },
        );
        self
    }

    /// Requests sent so far, in order.
    pub async fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.read().await.clone()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<HttpResponse, TransportFailure> {
        self.requests.write().await.push(request.clone());

        match self.replies.get(&request.url) {
            Some(Reply::Response(response)) => Ok(response.clone()),
            Some(Reply::Failure { message, response }) => Err(TransportFailure {
                error: TransportError::Other(message.clone()),
                response: response.clone(),
            }),
            None => Err(TransportError::Other(format!("no mock reply for {}", request.url)).into()),
        }
    }
}
