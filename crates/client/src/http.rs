//! HTTP terminal transport
//!
//! POSTs the operation as JSON to the configured endpoint and parses the
//! standard `{data, errors}` response body. Delivery failures (connect,
//! timeout, non-success status, malformed body) surface as transport
//! errors; they are not operation errors and never reach the credential
//! classifier.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use pipeline::{Error, ExecutionResult, Operation, Transport};

/// Terminal link delivering operations over HTTP.
pub struct HttpTransport {
    client: reqwest::Client,
    api_uri: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client, api_uri: String, timeout: Duration) -> Self {
        Self {
            client,
            api_uri,
            timeout,
        }
    }
}

impl Transport for HttpTransport {
    fn execute(
        &self,
        operation: Operation,
    ) -> Pin<Box<dyn Future<Output = pipeline::Result<ExecutionResult>> + Send + '_>> {
        Box::pin(async move {
            let body = serde_json::json!({
                "query": operation.query(),
                "variables": operation.variables(),
            });

            let response = self
                .client
                .post(&self.api_uri)
                .headers(operation.headers().clone())
                .timeout(self.timeout)
                .json(&body)
                .send()
                .await
                .map_err(|e| Error::Transport(format!("request failed: {e}")))?;

            let status = response.status();
            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| String::from("<no body>"));
                return Err(Error::Transport(format!(
                    "endpoint returned {status}: {body}"
                )));
            }

            response
                .json::<ExecutionResult>()
                .await
                .map_err(|e| Error::InvalidResponse(format!("response body: {e}")))
        })
    }
}
