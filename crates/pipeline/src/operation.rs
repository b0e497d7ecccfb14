//! In-flight request context
//!
//! An `Operation` is what travels down the chain: the request payload plus
//! the header map links may rewrite. Operations are cloneable so middleware
//! that might retry can keep the pre-failure state around.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::{Error, Result};

/// One request moving through the pipeline.
#[derive(Debug, Clone)]
pub struct Operation {
    id: String,
    query: String,
    variables: serde_json::Value,
    headers: HeaderMap,
}

impl Operation {
    /// Create an operation with a fresh id for log correlation.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            id: format!("op_{}", uuid::Uuid::new_v4().as_simple()),
            query: query.into(),
            variables: serde_json::Value::Null,
            headers: HeaderMap::new(),
        }
    }

    /// Attach a variables object to the operation.
    pub fn with_variables(mut self, variables: serde_json::Value) -> Self {
        self.variables = variables;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn variables(&self) -> &serde_json::Value {
        &self.variables
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Set the authorization header to `Bearer <token>`.
    ///
    /// Replaces any existing authorization value; all other headers are
    /// left untouched.
    pub fn set_bearer_token(&mut self, token: &str) -> Result<()> {
        let value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| Error::InvalidHeader(format!("bearer token: {e}")))?;
        self.headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_operations_get_distinct_ids() {
        let a = Operation::new("query { a }");
        let b = Operation::new("query { b }");
        assert!(a.id().starts_with("op_"));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn bearer_token_replaces_existing_authorization() {
        let mut operation = Operation::new("query { me }");
        operation
            .headers_mut()
            .insert(AUTHORIZATION, HeaderValue::from_static("Bearer stale"));
        operation
            .headers_mut()
            .insert("x-client", HeaderValue::from_static("mobile"));

        operation.set_bearer_token("fresh").unwrap();

        assert_eq!(
            operation.headers().get(AUTHORIZATION).unwrap(),
            "Bearer fresh"
        );
        assert_eq!(
            operation.headers().get("x-client").unwrap(),
            "mobile",
            "unrelated headers must be preserved"
        );
    }

    #[test]
    fn bearer_token_rejects_non_ascii_values() {
        let mut operation = Operation::new("query { me }");
        let result = operation.set_bearer_token("bad\ntoken");
        assert!(result.is_err());
    }

    #[test]
    fn clone_carries_headers_and_variables() {
        let mut operation =
            Operation::new("query { item }").with_variables(serde_json::json!({"id": 7}));
        operation.set_bearer_token("t1").unwrap();

        let copy = operation.clone();
        assert_eq!(copy.id(), operation.id());
        assert_eq!(copy.variables()["id"], 7);
        assert_eq!(copy.headers().get(AUTHORIZATION).unwrap(), "Bearer t1");
    }
}
