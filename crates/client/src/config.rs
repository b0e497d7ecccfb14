//! Client configuration
//!
//! Explicit configuration for the pipeline collaborators: transport
//! endpoint, cache persistence key, request timeout, and an optional token
//! endpoint for hosts using the bundled refresh helper. The cache key
//! travels through configuration rather than a process-wide constant.

use serde::Deserialize;
use std::path::Path;

/// Cache key used when the config doesn't name one.
pub const DEFAULT_CACHE_KEY: &str = "graph-cache";

/// Root client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Endpoint operations are POSTed to.
    pub api_uri: String,
    /// Key the persisted cache snapshot is stored under.
    #[serde(default = "default_cache_key")]
    pub cache_key: String,
    /// Per-operation transport timeout.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Token endpoint for hosts whose refresh hook uses
    /// `session::refresh_credentials`.
    #[serde(default)]
    pub token_endpoint: Option<String>,
}

fn default_cache_key() -> String {
    DEFAULT_CACHE_KEY.into()
}

fn default_timeout() -> u64 {
    60
}

impl ClientConfig {
    /// Configuration with defaults for everything but the endpoint.
    pub fn new(api_uri: impl Into<String>) -> Self {
        Self {
            api_uri: api_uri.into(),
            cache_key: default_cache_key(),
            timeout_secs: default_timeout(),
            token_endpoint: None,
        }
    }

    /// Load and validate configuration from a TOML file.
    pub fn load(path: &Path) -> common::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field constraints.
    pub fn validate(&self) -> common::Result<()> {
        if !self.api_uri.starts_with("http://") && !self.api_uri.starts_with("https://") {
            return Err(common::Error::Config(format!(
                "api_uri must start with http:// or https://, got: {}",
                self.api_uri
            )));
        }
        if self.timeout_secs == 0 {
            return Err(common::Error::Config(
                "timeout_secs must be greater than 0".into(),
            ));
        }
        if self.cache_key.is_empty() {
            return Err(common::Error::Config("cache_key must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_defaults() {
        let config = ClientConfig::new("https://api.example.com/graphql");
        assert_eq!(config.cache_key, DEFAULT_CACHE_KEY);
        assert_eq!(config.timeout_secs, 60);
        assert!(config.token_endpoint.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn loads_full_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        std::fs::write(
            &path,
            r#"
api_uri = "https://api.example.com/graphql"
cache_key = "mobile-cache"
timeout_secs = 30
token_endpoint = "https://auth.example.com/oauth/token"
"#,
        )
        .unwrap();

        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.api_uri, "https://api.example.com/graphql");
        assert_eq!(config.cache_key, "mobile-cache");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(
            config.token_endpoint.as_deref(),
            Some("https://auth.example.com/oauth/token")
        );
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        std::fs::write(&path, "api_uri = \"https://api.example.com/graphql\"\n").unwrap();

        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.cache_key, DEFAULT_CACHE_KEY);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn rejects_api_uri_without_scheme() {
        let config = ClientConfig::new("api.example.com/graphql");
        let err = config.validate().unwrap_err();
        assert!(
            err.to_string().contains("api_uri must start with http"),
            "error must explain the constraint, got: {err}"
        );
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = ClientConfig::new("https://api.example.com/graphql");
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_cache_key() {
        let mut config = ClientConfig::new("https://api.example.com/graphql");
        config.cache_key = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "not valid {{{{ toml").unwrap();
        assert!(ClientConfig::load(&path).is_err());
    }

    #[test]
    fn load_rejects_missing_file() {
        assert!(ClientConfig::load(Path::new("/nonexistent/client.toml")).is_err());
    }
}
