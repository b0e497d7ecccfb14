//! Operation results and structured errors
//!
//! The wire shape follows the usual GraphQL response layout: a `data`
//! payload plus an `errors` array where each entry carries a message and,
//! for server-side exceptions, a nested exception name under `extensions`.

use serde::Deserialize;

/// One structured error reported by a failed operation.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<ErrorExtensions>,
}

/// Server-attached error metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorExtensions {
    #[serde(default)]
    pub exception: Option<ExceptionDetails>,
}

/// The originating exception, when the server reports one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExceptionDetails {
    #[serde(default)]
    pub name: Option<String>,
}

impl OperationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extensions: None,
        }
    }

    /// Build an error carrying a nested exception name.
    pub fn with_exception_name(message: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extensions: Some(ErrorExtensions {
                exception: Some(ExceptionDetails {
                    name: Some(name.into()),
                }),
            }),
        }
    }

    /// The nested exception name, if the server attached one.
    pub fn exception_name(&self) -> Option<&str> {
        self.extensions.as_ref()?.exception.as_ref()?.name.as_deref()
    }
}

/// The outcome of one delivered operation.
///
/// An empty `errors` batch means the operation succeeded; a non-empty batch
/// is the failure signal middleware inspects.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecutionResult {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<OperationError>,
}

impl ExecutionResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_graphql_error_shape() {
        let body = r#"{
            "data": null,
            "errors": [
                {
                    "message": "Context creation failed: jwt expired",
                    "extensions": {"exception": {"name": "TokenExpiredError"}}
                }
            ]
        }"#;
        let result: ExecutionResult = serde_json::from_str(body).unwrap();
        assert!(result.has_errors());
        assert_eq!(result.errors[0].exception_name(), Some("TokenExpiredError"));
    }

    #[test]
    fn deserializes_success_without_errors_field() {
        let body = r#"{"data": {"viewer": {"id": "u1"}}}"#;
        let result: ExecutionResult = serde_json::from_str(body).unwrap();
        assert!(!result.has_errors());
        assert_eq!(result.data.unwrap()["viewer"]["id"], "u1");
    }

    #[test]
    fn exception_name_absent_when_extensions_missing() {
        let error = OperationError::new("Variable $id of required type ID! was not provided");
        assert_eq!(error.exception_name(), None);
    }

    #[test]
    fn exception_name_absent_when_name_missing() {
        let body = r#"{"message": "boom", "extensions": {"exception": {}}}"#;
        let error: OperationError = serde_json::from_str(body).unwrap();
        assert_eq!(error.exception_name(), None);
    }

    #[test]
    fn with_exception_name_round_trips_accessor() {
        let error = OperationError::with_exception_name("jwt expired", "JsonWebTokenError");
        assert_eq!(error.exception_name(), Some("JsonWebTokenError"));
    }
}
