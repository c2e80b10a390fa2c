//! Classified result of one API call.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::WsfError;

use super::transport::HttpResponse;

/// The classification of one completed call. Exactly one is produced per
/// call.
#[derive(Debug)]
pub enum Outcome {
    /// The transport failed; nothing was parsed.
    TransportFailure {
        error: WsfError,
        response: Option<HttpResponse>,
    },
    /// The body was not valid JSON.
    ParseFailure {
        error: WsfError,
        response: HttpResponse,
    },
    /// The payload carried an `errors` field.
    ApiFailure {
        errors: Value,
        data: Value,
        response: HttpResponse,
    },
    /// The payload parsed cleanly but the status was not 200.
    StatusFailure {
        error: WsfError,
        data: Value,
        response: HttpResponse,
    },
    /// Status 200 and no `errors`.
    Success { data: Value, response: HttpResponse },
}

/// The data slot handed to a completion callback.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No body was received
    Empty,
    /// The body as received, unparsed
    Raw(String),
    /// The parsed body
    Json(Value),
}

impl Payload {
    /// The parsed body, if there is one.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            _ => None,
        }
    }
}

impl Outcome {
    /// Classify a parsed payload. `errors` takes precedence over the status.
    pub(crate) fn classify(data: Value, response: HttpResponse) -> Self {
        match data.get("errors") {
            Some(errors) => Outcome::ApiFailure {
                errors: errors.clone(),
                data,
                response,
            },
            None if response.status != 200 => Outcome::StatusFailure {
                error: WsfError::Status {
                    status: response.status,
                },
                data,
                response,
            },
            None => Outcome::Success { data, response },
        }
    }

    /// Whether the call succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Short name of the variant, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::TransportFailure { .. } => "transport_failure",
            Outcome::ParseFailure { .. } => "parse_failure",
            Outcome::ApiFailure { .. } => "api_failure",
            Outcome::StatusFailure { .. } => "status_failure",
            Outcome::Success { .. } => "success",
        }
    }

    /// The raw response, when one was received.
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            Outcome::TransportFailure { response, .. } => response.as_ref(),
            Outcome::ParseFailure { response, .. }
            | Outcome::ApiFailure { response, .. }
            | Outcome::StatusFailure { response, .. }
            | Outcome::Success { response, .. } => Some(response),
        }
    }

    /// Split into the callback triple `(error, data, response)`.
    ///
    /// On transport failure the data is the partial body, if any; on parse
    /// failure it is the raw unparsed body.
    pub fn into_parts(self) -> (Option<WsfError>, Payload, Option<HttpResponse>) {
        match self {
            Outcome::TransportFailure { error, response } => {
                let data = match &response {
                    Some(response) if !response.body.is_empty() => {
                        Payload::Raw(response.body.clone())
                    }
                    _ => Payload::Empty,
                };
                (Some(error), data, response)
            }
            Outcome::ParseFailure { error, response } => {
                (Some(error), Payload::Raw(response.body.clone()), Some(response))
            }
            Outcome::ApiFailure {
                errors,
                data,
                response,
            } => (Some(WsfError::Api(errors)), Payload::Json(data), Some(response)),
            Outcome::StatusFailure {
                error,
                data,
                response,
            } => (Some(error), Payload::Json(data), Some(response)),
            Outcome::Success { data, response } => (None, Payload::Json(data), Some(response)),
        }
    }

    /// The successful payload decoded as `T`, or the error.
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T, WsfError> {
        match self {
            Outcome::Success { data, .. } => serde_json::from_value(data).map_err(WsfError::Decode),
            Outcome::ApiFailure { errors, .. } => Err(WsfError::Api(errors)),
            Outcome::TransportFailure { error, .. }
            | Outcome::ParseFailure { error, .. }
            | Outcome::StatusFailure { error, .. } => Err(error),
        }
    }
}
