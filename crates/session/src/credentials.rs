//! Credential pair exchanged with the session hooks

use serde::{Deserialize, Serialize};

/// The outcome of a successful refresh: the new token pair.
///
/// Matches the token endpoint's response body; extra fields the endpoint
/// may send (expiry deltas, scopes) are ignored on deserialization since
/// the middleware only forwards the pair to the login hook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_token_endpoint_response() {
        let json = r#"{"access_token":"at_abc","refresh_token":"rt_def","expires_in":3600}"#;
        let credentials: Credentials = serde_json::from_str(json).unwrap();
        assert_eq!(credentials.access_token, "at_abc");
        assert_eq!(credentials.refresh_token, "rt_def");
    }

    #[test]
    fn serializes_both_tokens() {
        let credentials = Credentials {
            access_token: "at_test".into(),
            refresh_token: "rt_test".into(),
        };
        let json = serde_json::to_string(&credentials).unwrap();
        assert!(json.contains("\"access_token\":\"at_test\""));
        assert!(json.contains("\"refresh_token\":\"rt_test\""));
    }
}
