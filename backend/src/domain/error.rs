//! Domain-level error type.
//!
//! Errors are transport agnostic; the HTTP adapter maps [`ErrorCode`] to a
//! status and serialises the payload as-is (internal errors are redacted).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// The requested resource does not exist.
    NotFound,
    /// A collaborator (authentication backend, directory) is not answering.
    ServiceUnavailable,
    /// An unexpected error occurred inside the service.
    InternalError,
}

/// Error payload returned to adapters.
///
/// The current [`TraceId`] is captured at construction time so responses
/// correlate with logs without extra plumbing.
///
/// # Examples
/// ```
/// use portal::domain::{Error, ErrorCode};
///
/// let err = Error::unauthorized("invalid credentials");
/// assert_eq!(err.code(), ErrorCode::Unauthorized);
/// assert_eq!(err.message(), "invalid credentials");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "unauthorized")]
    code: ErrorCode,
    #[schema(example = "invalid credentials")]
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error tagged with the trace id in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace identifier of the request that produced the error.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Structured details, e.g. the offending field.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Override the captured trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details.
    ///
    /// # Examples
    /// ```
    /// use portal::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "username" }));
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Error::invalid_request("x"), ErrorCode::InvalidRequest)]
    #[case(Error::unauthorized("x"), ErrorCode::Unauthorized)]
    #[case(Error::not_found("x"), ErrorCode::NotFound)]
    #[case(Error::service_unavailable("x"), ErrorCode::ServiceUnavailable)]
    #[case(Error::internal("x"), ErrorCode::InternalError)]
    fn constructors_set_codes(#[case] error: Error, #[case] expected: ErrorCode) {
        assert_eq!(error.code(), expected);
    }

    #[tokio::test]
    async fn captures_trace_id_in_scope() {
        let id = TraceId::generate();
        let error = TraceId::scope(id, async { Error::internal("boom") }).await;
        assert_eq!(error.trace_id(), Some(id.to_string().as_str()));
    }

    #[rstest]
    fn no_trace_id_out_of_scope() {
        assert!(Error::internal("boom").trace_id().is_none());
    }

    #[rstest]
    fn serialises_camel_case_and_skips_empty_fields() {
        let value = serde_json::to_value(
            Error::invalid_request("bad").with_details(json!({ "field": "password" })),
        )
        .expect("serialise error");
        assert_eq!(
            value,
            json!({
                "code": "invalid_request",
                "message": "bad",
                "details": { "field": "password" }
            })
        );
    }
}
