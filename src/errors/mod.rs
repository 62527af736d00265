//! Error types for the Fakturoid client.

use std::fmt;
use thiserror::Error;

/// Result type alias for Fakturoid operations.
pub type FakturoidResult<T> = Result<T, FakturoidError>;

/// Error kinds for categorizing Fakturoid errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakturoidErrorKind {
    // Configuration errors
    /// Invalid client configuration.
    InvalidConfiguration,

    // Authentication errors
    /// Token exchange failed or returned an unusable response.
    AuthenticationFailed,
    /// Bad credentials (401).
    BadCredentials,
    /// Access forbidden (403).
    Forbidden,

    // Caller errors, raised before any request is sent
    /// Invalid parameter value or type.
    InvalidParameter,
    /// Unknown lifecycle event name.
    InvalidEvent,
    /// Event argument outside the event's accepted set, or wrongly typed.
    InvalidEventArgument,

    // Server-reported errors
    /// Server-side validation failed; the raw `errors` payload is attached.
    ValidationFailed,
    /// Resource not found (404).
    NotFound,
    /// Unprocessable entity (422) without an `errors` payload.
    UnprocessableEntity,
    /// Too many requests (429).
    TooManyRequests,

    // Network errors
    /// Connection failed.
    ConnectionFailed,
    /// Request timeout.
    Timeout,

    // Server errors
    /// Internal server error (500).
    InternalError,
    /// Service unavailable (503).
    ServiceUnavailable,

    // Response errors
    /// Failed to deserialize response.
    DeserializationError,

    /// Unknown error.
    Unknown,
}

impl fmt::Display for FakturoidErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration => write!(f, "invalid_configuration"),
            Self::AuthenticationFailed => write!(f, "authentication_failed"),
            Self::BadCredentials => write!(f, "bad_credentials"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::InvalidParameter => write!(f, "invalid_parameter"),
            Self::InvalidEvent => write!(f, "invalid_event"),
            Self::InvalidEventArgument => write!(f, "invalid_event_argument"),
            Self::ValidationFailed => write!(f, "validation_failed"),
            Self::NotFound => write!(f, "not_found"),
            Self::UnprocessableEntity => write!(f, "unprocessable_entity"),
            Self::TooManyRequests => write!(f, "too_many_requests"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::InternalError => write!(f, "internal_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::DeserializationError => write!(f, "deserialization_error"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Fakturoid API error with detailed information.
#[derive(Error, Debug)]
pub struct FakturoidError {
    /// Error kind.
    kind: FakturoidErrorKind,
    /// Error message.
    message: String,
    /// HTTP status code.
    status_code: Option<u16>,
    /// Raw `errors` payload from a server validation response.
    validation_errors: Option<serde_json::Value>,
    /// Underlying cause.
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for FakturoidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(code) = self.status_code {
            write!(f, " (HTTP {})", code)?;
        }
        if let Some(ref errors) = self.validation_errors {
            write!(f, ": {}", errors)?;
        }
        Ok(())
    }
}

impl FakturoidError {
    /// Creates a new Fakturoid error.
    pub fn new(kind: FakturoidErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            validation_errors: None,
            cause: None,
        }
    }

    /// Sets the HTTP status code.
    pub fn with_status(mut self, code: u16) -> Self {
        self.status_code = Some(code);
        self
    }

    /// Sets the underlying cause.
    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Gets the error kind.
    pub fn kind(&self) -> &FakturoidErrorKind {
        &self.kind
    }

    /// Gets the HTTP status code.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Gets the raw server validation payload, if any.
    pub fn validation_errors(&self) -> Option<&serde_json::Value> {
        self.validation_errors.as_ref()
    }

    /// Returns true for errors raised from caller input before any request
    /// was dispatched.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self.kind,
            FakturoidErrorKind::InvalidParameter
                | FakturoidErrorKind::InvalidEvent
                | FakturoidErrorKind::InvalidEventArgument
        )
    }

    /// Creates an error from a non-success HTTP status code.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        Self::new(Self::kind_from_status(status), message).with_status(status)
    }

    /// Maps HTTP status code to error kind.
    fn kind_from_status(status: u16) -> FakturoidErrorKind {
        match status {
            400 => FakturoidErrorKind::InvalidParameter,
            401 => FakturoidErrorKind::BadCredentials,
            403 => FakturoidErrorKind::Forbidden,
            404 => FakturoidErrorKind::NotFound,
            422 => FakturoidErrorKind::UnprocessableEntity,
            429 => FakturoidErrorKind::TooManyRequests,
            500 => FakturoidErrorKind::InternalError,
            503 => FakturoidErrorKind::ServiceUnavailable,
            _ => FakturoidErrorKind::Unknown,
        }
    }

    // Convenience constructors

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(FakturoidErrorKind::InvalidConfiguration, message)
    }

    /// Creates an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(FakturoidErrorKind::AuthenticationFailed, message)
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(FakturoidErrorKind::InvalidParameter, message)
    }

    /// Creates a server validation error carrying the raw `errors` payload.
    pub fn validation(status: u16, errors: serde_json::Value) -> Self {
        let mut error = Self::new(
            FakturoidErrorKind::ValidationFailed,
            "Server rejected the submitted fields",
        )
        .with_status(status);
        error.validation_errors = Some(errors);
        error
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(FakturoidErrorKind::Timeout, message)
    }

    /// Creates a deserialization error.
    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::new(FakturoidErrorKind::DeserializationError, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = FakturoidError::new(FakturoidErrorKind::NotFound, "Invoice not found")
            .with_status(404);

        let display = format!("{}", error);
        assert!(display.contains("not_found"));
        assert!(display.contains("Invoice not found"));
        assert!(display.contains("404"));
    }

    #[test]
    fn test_validation_carries_payload() {
        let payload = serde_json::json!({"name": ["can't be blank"]});
        let error = FakturoidError::validation(422, payload.clone());

        assert_eq!(*error.kind(), FakturoidErrorKind::ValidationFailed);
        assert_eq!(error.status_code(), Some(422));
        assert_eq!(error.validation_errors(), Some(&payload));
        assert!(format!("{}", error).contains("can't be blank"));
    }

    #[test]
    fn test_from_status() {
        let error = FakturoidError::from_status(404, "no such subject");
        assert_eq!(*error.kind(), FakturoidErrorKind::NotFound);
        assert_eq!(error.status_code(), Some(404));

        let error = FakturoidError::from_status(503, "maintenance");
        assert_eq!(*error.kind(), FakturoidErrorKind::ServiceUnavailable);
    }

    #[test]
    fn test_is_caller_error() {
        assert!(FakturoidError::invalid_parameter("id must be positive").is_caller_error());
        assert!(!FakturoidError::from_status(404, "missing").is_caller_error());
    }
}
