//! HTTP client wrapper around the backend's response envelope

use crate::{Error, Result};
use quotapanel_core::ResponseModel;
use reqwest::{Client, Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};

/// API client for making HTTP requests to the panel backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            token: None,
        }
    }

    /// Set the bearer token for authentication
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace the bearer token on an existing client
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Base URL this client talks to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request for `path` with the bearer token applied
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let mut request = self.client.request(method, url);

        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        request
    }

    /// Send a request and parse the response envelope.
    ///
    /// A parseable envelope wins over the HTTP status: the backend reports
    /// failures as `success == false`, sometimes on non-2xx responses. Only
    /// when the body is not an envelope does the status code surface.
    pub(crate) async fn send_envelope<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        default_error: &str,
    ) -> Result<ResponseModel<T>> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        match serde_json::from_slice::<ResponseModel<T>>(&body) {
            Ok(envelope) => {
                if status.is_success() && envelope.success {
                    Ok(envelope)
                } else {
                    Err(Error::remote(
                        envelope
                            .message
                            .unwrap_or_else(|| default_error.to_string()),
                    ))
                }
            }
            Err(err) if status.is_success() => Err(Error::Decode(err)),
            Err(_) => Err(Error::Status {
                status: status.as_u16(),
            }),
        }
    }

    /// GET `path` and unwrap the envelope payload
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        default_error: &str,
    ) -> Result<Option<T>> {
        let envelope = self
            .send_envelope(self.request(Method::GET, path), default_error)
            .await?;
        Ok(envelope.data)
    }

    /// POST a JSON body to `path` and unwrap the envelope payload
    pub(crate) async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        default_error: &str,
    ) -> Result<Option<T>> {
        let envelope = self
            .send_envelope(self.request(Method::POST, path).json(body), default_error)
            .await?;
        Ok(envelope.data)
    }

    /// PUT a JSON body to `path` and unwrap the envelope payload
    pub(crate) async fn put_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        default_error: &str,
    ) -> Result<Option<T>> {
        let envelope = self
            .send_envelope(self.request(Method::PUT, path).json(body), default_error)
            .await?;
        Ok(envelope.data)
    }

    /// PUT to `path` with no body, discarding any payload
    pub(crate) async fn put_empty(&self, path: &str, default_error: &str) -> Result<()> {
        self.send_envelope::<serde_json::Value>(self.request(Method::PUT, path), default_error)
            .await?;
        Ok(())
    }

    /// PATCH `path` with no body and unwrap the envelope payload
    pub(crate) async fn patch_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        default_error: &str,
    ) -> Result<Option<T>> {
        let envelope = self
            .send_envelope(self.request(Method::PATCH, path), default_error)
            .await?;
        Ok(envelope.data)
    }

    /// DELETE `path`, discarding any payload
    pub(crate) async fn delete(&self, path: &str, default_error: &str) -> Result<()> {
        self.send_envelope::<serde_json::Value>(self.request(Method::DELETE, path), default_error)
            .await?;
        Ok(())
    }

    /// GET `path` as a raw byte stream, bypassing the envelope.
    ///
    /// Error responses still attempt an envelope parse so backend messages
    /// are not lost.
    pub(crate) async fn get_bytes(&self, path: &str, default_error: &str) -> Result<Vec<u8>> {
        let response = self.request(Method::GET, path).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            return Ok(body.to_vec());
        }

        match serde_json::from_slice::<ResponseModel<serde_json::Value>>(&body) {
            Ok(envelope) => Err(Error::remote(
                envelope
                    .message
                    .unwrap_or_else(|| default_error.to_string()),
            )),
            Err(_) => Err(Error::Status {
                status: status.as_u16(),
            }),
        }
    }

    /// Percent-encode a path segment taken from operator input
    pub(crate) fn encode_segment(segment: &str) -> String {
        urlencoding::encode(segment).into_owned()
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::uninlined_format_args)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_envelope_success_unwraps_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": 7})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let value: Option<i64> = client.get_json("/ping", "Failed").await.unwrap();
        assert_eq!(value, Some(7));
    }

    #[tokio::test]
    async fn test_envelope_failure_uses_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"success": false, "message": "panel unreachable"}),
            ))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let error = client
            .get_json::<i64>("/ping", "Failed")
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "panel unreachable");
    }

    #[tokio::test]
    async fn test_envelope_failure_falls_back_to_default_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let error = client
            .get_json::<i64>("/ping", "Failed to ping")
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "Failed to ping");
    }

    #[tokio::test]
    async fn test_non_envelope_error_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let error = client
            .get_json::<i64>("/ping", "Failed")
            .await
            .unwrap_err();
        match error {
            Error::Status { status } => assert_eq!(status, 502),
            other => panic!("Expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_envelope_wins_over_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(404).set_body_json(
                json!({"success": false, "message": "User not found"}),
            ))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let error = client
            .get_json::<i64>("/ping", "Failed")
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "User not found");
    }

    #[tokio::test]
    async fn test_bearer_token_header_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/secure"))
            .and(header("authorization", "Bearer sekrit"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": true})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).with_token("sekrit");
        let value: Option<bool> = client.get_json("/secure", "Failed").await.unwrap();
        assert_eq!(value, Some(true));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://example.com/");
        assert_eq!(client.base_url(), "http://example.com");
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(
            ApiClient::encode_segment("alice@example.com"),
            "alice%40example.com"
        );
        assert_eq!(ApiClient::encode_segment("plain"), "plain");
    }
}
