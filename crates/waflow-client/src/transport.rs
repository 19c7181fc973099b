//! Authenticated Graph API transport

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;
use tracing::debug;
use waflow_core::{Credentials, Error, HttpMethod, Result};

/// Authenticated JSON request capability
///
/// The seam between the dispatch loop and the network: token attachment,
/// TLS, and timeouts all live behind this trait.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a single request and return the decoded JSON response
    async fn request(&self, method: HttpMethod, url: &str, body: Option<Value>) -> Result<Value>;
}

/// reqwest-backed transport with bearer-token authentication
pub struct GraphClient {
    client: reqwest::Client,
    access_token: String,
}

impl GraphClient {
    /// Create a transport from credentials
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(credentials: &Credentials) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            access_token: credentials.access_token.clone(),
        })
    }
}

#[async_trait]
impl Transport for GraphClient {
    async fn request(&self, method: HttpMethod, url: &str, body: Option<Value>) -> Result<Value> {
        debug!(%method, url, "sending Graph API request");

        let mut request = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Delete => self.client.delete(url),
        }
        .bearer_auth(&self.access_token);

        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(format!("request failed: {e}")))?;
        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .map_err(|e| Error::Network(format!("invalid API response: {e}")))?;

        // the Graph API reports failures in the body, sometimes with a 200
        if let Some(error) = api_error(&payload) {
            return Err(error);
        }
        if !status.is_success() {
            return Err(Error::Network(format!("HTTP {status}")));
        }
        Ok(payload)
    }
}

/// Extract a structured `{error: {code, message}}` provider error
fn api_error(payload: &Value) -> Option<Error> {
    let error = payload.get("error")?;
    let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown WhatsApp API error")
        .to_string();
    Some(Error::Api { code, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_error_extracted() {
        let payload = json!({
            "error": { "code": 131026, "message": "Receiver incapable" }
        });

        match api_error(&payload) {
            Some(Error::Api { code, message }) => {
                assert_eq!(code, 131026);
                assert_eq!(message, "Receiver incapable");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_defaults_for_partial_payload() {
        let payload = json!({ "error": {} });
        match api_error(&payload) {
            Some(Error::Api { code, message }) => {
                assert_eq!(code, 0);
                assert_eq!(message, "unknown WhatsApp API error");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_success_payload_has_no_error() {
        let payload = json!({ "messages": [{ "id": "wamid.abc" }] });
        assert!(api_error(&payload).is_none());
    }
}
