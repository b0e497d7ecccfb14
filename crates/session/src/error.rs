//! Error types for session operations

/// Errors from session hook implementations and the refresh helper.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("token refresh failed: {0}")]
    Refresh(String),

    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("cannot store new tokens when the session is logged out")]
    SessionTerminated,

    #[error("login failed: {0}")]
    Login(String),

    #[error("logout failed: {0}")]
    Logout(String),
}

/// Result alias for session operations.
pub type Result<T> = std::result::Result<T, Error>;
