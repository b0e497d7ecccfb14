//! HTTP refresh-token exchange
//!
//! Ready-made refresh hook body for hosts whose session is backed by a
//! standard OAuth-style token endpoint: POST the stored refresh token with
//! `grant_type=refresh_token`, get back a new token pair. The endpoint and
//! optional client id are explicit parameters; nothing in this module is
//! process-wide state.

use tracing::debug;

use crate::credentials::Credentials;
use crate::error::{Error, Result};

/// Exchange a refresh token for new credentials.
///
/// A 401/403 from the endpoint means the refresh token itself was rejected
/// (revoked or expired) and maps to `Error::InvalidCredentials`; any other
/// non-success status or a malformed body maps to `Error::Refresh`.
pub async fn refresh_credentials(
    client: &reqwest::Client,
    token_endpoint: &str,
    refresh_token: &str,
    client_id: Option<&str>,
) -> Result<Credentials> {
    let mut form = vec![
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
    ];
    if let Some(id) = client_id {
        form.push(("client_id", id));
    }

    let response = client
        .post(token_endpoint)
        .form(&form)
        .send()
        .await
        .map_err(|e| Error::Http(format!("token refresh request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<no body>"));

        // 401/403 means the refresh token is revoked or invalid
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(Error::InvalidCredentials(format!(
                "refresh token rejected ({status}): {body}"
            )));
        }

        return Err(Error::Refresh(format!(
            "token endpoint returned {status}: {body}"
        )));
    }

    debug!("token endpoint accepted refresh");
    response
        .json::<Credentials>()
        .await
        .map_err(|e| Error::Refresh(format!("invalid refresh response: {e}")))
}
