use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// Submission input that must never reach storage. Resolution misses are not
/// errors and have no representation here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    UnknownQuestion(String),
    MalformedScoreVector { question: String, detail: String },
    ResponseOutOfRange { question: String, response: i32 },
    AxisScoreOutOfRange { axis: &'static str, value: i32 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnknownQuestion(id) => {
                write!(f, "unknown question id: {}", id)
            }
            ValidationError::MalformedScoreVector { question, detail } => {
                write!(f, "malformed score vector for {}: {}", question, detail)
            }
            ValidationError::ResponseOutOfRange { question, response } => {
                write!(f, "response number {} for {} is out of range", response, question)
            }
            ValidationError::AxisScoreOutOfRange { axis, value } => {
                write!(f, "aggregate score {} for the {} axis is out of range", value, axis)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Failure of one submission. Validation rejects before anything is written;
/// persistence failures surface after a single write attempt, never retried.
#[derive(Debug)]
pub enum SubmitError {
    Validation(ValidationError),
    Persistence(String),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Validation(err) => write!(f, "invalid submission: {}", err),
            SubmitError::Persistence(reason) => write!(f, "failed to store submission: {}", reason),
        }
    }
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubmitError::Validation(err) => Some(err),
            SubmitError::Persistence(_) => None,
        }
    }
}

impl From<ValidationError> for SubmitError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        let status = match self {
            SubmitError::Validation(_) => StatusCode::BAD_REQUEST,
            SubmitError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
