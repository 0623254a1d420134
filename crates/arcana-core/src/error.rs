//! Unified error types for the resource layer.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for Arcana Resources.
///
/// Covers misconfiguration of resources, serialization failures raised
/// while converting records to JSON, and the usual request-level errors
/// a resource's own conversion may want to surface.
#[derive(Error, Debug)]
pub enum ArcanaError {
    // ============ Resource Errors ============
    /// A resource or collection is misconfigured (e.g. unknown collects type)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON conversion failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ============ Request Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ArcanaError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Configuration(_)
            | Self::Serialization(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error comes from how a resource was declared rather
    /// than from the data it was handed.
    #[must_use]
    pub const fn is_misconfiguration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<serde_json::Error> for ArcanaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Request trace ID for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response from an `ArcanaError`.
    #[must_use]
    pub fn from_error(error: &ArcanaError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            trace_id: None,
        }
    }

    /// Sets the trace ID.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }
}

impl From<&ArcanaError> for ErrorResponse {
    fn from(error: &ArcanaError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(ArcanaError::configuration("missing collects").status_code(), 500);
        assert_eq!(ArcanaError::Serialization("bad".to_string()).status_code(), 500);
        assert_eq!(ArcanaError::not_found("User", 1).status_code(), 404);
        assert_eq!(ArcanaError::validation("invalid page").status_code(), 400);
        assert_eq!(ArcanaError::internal("oops").status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ArcanaError::configuration("x").error_code(), "CONFIGURATION_ERROR");
        assert_eq!(ArcanaError::Serialization("x".to_string()).error_code(), "SERIALIZATION_ERROR");
        assert_eq!(ArcanaError::not_found("User", 1).error_code(), "NOT_FOUND");
        assert_eq!(ArcanaError::validation("x").error_code(), "VALIDATION_ERROR");
        assert_eq!(ArcanaError::internal("x").error_code(), "INTERNAL_ERROR");
        assert_eq!(
            ArcanaError::Other(anyhow::anyhow!("boom")).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_misconfiguration() {
        assert!(ArcanaError::configuration("no collects").is_misconfiguration());
        assert!(!ArcanaError::validation("bad input").is_misconfiguration());
        assert!(!ArcanaError::internal("oops").is_misconfiguration());
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ArcanaError = err.into();
        assert!(matches!(err, ArcanaError::Serialization(_)));
    }

    #[test]
    fn test_error_display() {
        let err = ArcanaError::configuration(
            "The [UserCollection] resource must specify the models it collects.",
        );
        assert!(err.to_string().starts_with("Configuration error:"));
        assert!(err.to_string().contains("UserCollection"));
    }

    #[test]
    fn test_error_response_from_error() {
        let err = ArcanaError::not_found("User", 1);
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(!response.message.is_empty());
        assert!(response.trace_id.is_none());
    }

    #[test]
    fn test_error_response_with_trace_id() {
        let err = ArcanaError::configuration("x");
        let response = ErrorResponse::from(&err).with_trace_id("trace-123");
        assert_eq!(response.trace_id, Some("trace-123".to_string()));
    }

    #[test]
    fn test_error_response_omits_missing_trace_id() {
        let response = ErrorResponse::from_error(&ArcanaError::internal("x"));
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("trace_id").is_none());
    }
}
