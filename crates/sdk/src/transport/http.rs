//! HTTP transport layer for the SendGrid SDK.

use crate::config::ClientConfig;
use crate::error::{SendGridError, SendGridResult};
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// HTTP transport for making API requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> SendGridResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(SendGridError::Config("API key must not be empty".to_string()));
        }

        let mut headers = header::HeaderMap::new();

        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| SendGridError::Config("Invalid API key format".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("mailrelay/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Build a URL for the given path.
    fn build_url(&self, path: &str) -> SendGridResult<url::Url> {
        Ok(self.config.base_url.join(path)?)
    }

    /// Execute a request with retries.
    ///
    /// POST requests are not idempotent (a mail send may already have been
    /// accepted), so they are only repeated after a 429.
    async fn execute_with_retry(&self, request_builder: RequestBuilder) -> SendGridResult<Response> {
        let retry_config = &self.config.retry_config;
        let mut attempts = 0;

        loop {
            let request = request_builder
                .try_clone()
                .ok_or_else(|| SendGridError::Config("Request cannot be cloned".to_string()))?
                .build()?;
            let idempotent = request.method() != Method::POST;

            let err = match self.client.execute(request).await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => {
                    let status = response.status().as_u16();
                    let body = response.text().await.unwrap_or_default();
                    SendGridError::from_response(status, &body)
                }
                Err(e) if e.is_timeout() => SendGridError::Timeout,
                Err(e) => return Err(e.into()),
            };

            let retry = attempts < retry_config.max_retries
                && err.is_retryable(idempotent)
                && err
                    .status()
                    .map_or(true, |status| retry_config.should_retry_status(status));
            if !retry {
                return Err(err);
            }

            let backoff = retry_config.backoff_for_attempt(attempts);
            warn!(
                status = ?err.status(),
                attempt = attempts + 1,
                backoff_ms = backoff.as_millis(),
                "SendGrid request failed, retrying"
            );
            tokio::time::sleep(backoff).await;
            attempts += 1;
        }
    }

    /// Decode a JSON body. Empty bodies (202/204) decode as `null`.
    async fn read_json<T: DeserializeOwned>(response: Response) -> SendGridResult<T> {
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(serde_json::from_str("null")?);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Execute a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> SendGridResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request");

        let response = self.execute_with_retry(self.client.get(url)).await?;
        Self::read_json(response).await
    }

    /// Execute a GET request with query parameters.
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> SendGridResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request with query");

        let response = self
            .execute_with_retry(self.client.get(url).query(query))
            .await?;
        Self::read_json(response).await
    }

    /// Execute a POST request.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> SendGridResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "POST request");

        let response = self
            .execute_with_retry(self.client.post(url).json(body))
            .await?;
        Self::read_json(response).await
    }

    /// Execute a PUT request.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> SendGridResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "PUT request");

        let response = self
            .execute_with_retry(self.client.put(url).json(body))
            .await?;
        Self::read_json(response).await
    }

    /// Execute a DELETE request without a response body.
    pub async fn delete(&self, path: &str) -> SendGridResult<()> {
        let url = self.build_url(path)?;
        debug!(url = %url, "DELETE request");

        self.execute_with_retry(self.client.delete(url)).await?;
        Ok(())
    }

    /// Execute a DELETE request with query parameters, returning the body.
    pub async fn delete_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> SendGridResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "DELETE request with query");

        let response = self
            .execute_with_retry(self.client.delete(url).query(query))
            .await?;
        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryConfig;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestResponse {
        message: String,
        value: i32,
    }

    fn create_config(base_url: &str) -> Arc<ClientConfig> {
        Arc::new(ClientConfig {
            base_url: url::Url::parse(base_url).unwrap(),
            api_key: "SG.test-key".to_string(),
            timeout: Duration::from_secs(30),
            retry_config: RetryConfig::no_retry(),
        })
    }

    #[tokio::test]
    async fn test_get_sends_bearer_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/test"))
            .and(header("Authorization", "Bearer SG.test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                message: "success".to_string(),
                value: 42,
            }))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: TestResponse = transport.get("/v3/test").await.unwrap();
        assert_eq!(result.value, 42);
    }

    #[tokio::test]
    async fn test_empty_api_key_rejected() {
        let mut config = (*create_config("http://localhost:1")).clone();
        config.api_key = "  ".to_string();

        let err = HttpTransport::new(Arc::new(config)).unwrap_err();
        assert!(matches!(err, SendGridError::Config(_)));
    }

    #[tokio::test]
    async fn test_post_accepts_empty_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .respond_with(ResponseTemplate::new(202))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: serde_json::Value = transport
            .post("/v3/mail/send", &serde_json::json!({"subject": "hi"}))
            .await
            .unwrap();
        assert!(result.is_null());
    }

    #[tokio::test]
    async fn test_get_with_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/templates"))
            .and(query_param("generations", "dynamic"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                message: "filtered".to_string(),
                value: 1,
            }))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: TestResponse = transport
            .get_with_query("/v3/templates", &[("generations", "dynamic")])
            .await
            .unwrap();
        assert_eq!(result.message, "filtered");
    }

    #[tokio::test]
    async fn test_error_body_is_structured() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "errors": [
                    {"message": "The from address does not match a verified Sender Identity.", "field": "from"},
                    {"message": "The subject is required.", "field": "subject"}
                ]
            })))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: SendGridResult<serde_json::Value> =
            transport.post("/v3/mail/send", &serde_json::json!({})).await;
        match result {
            Err(SendGridError::Api { status, errors }) => {
                assert_eq!(status, 400);
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[1].message, "The subject is required.");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_retries_on_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/flaky"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v3/flaky"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                message: "recovered".to_string(),
                value: 7,
            }))
            .mount(&server)
            .await;

        let mut config = (*create_config(&server.uri())).clone();
        config.retry_config = RetryConfig {
            max_retries: 1,
            initial_backoff: Duration::from_millis(1),
            ..Default::default()
        };
        let transport = HttpTransport::new(Arc::new(config)).unwrap();

        let result: TestResponse = transport.get("/v3/flaky").await.unwrap();
        assert_eq!(result.message, "recovered");
    }

    fn retrying_config(base_url: &str) -> Arc<ClientConfig> {
        let mut config = (*create_config(base_url)).clone();
        config.retry_config = RetryConfig {
            max_retries: 2,
            initial_backoff: Duration::from_millis(1),
            ..Default::default()
        };
        Arc::new(config)
    }

    #[tokio::test]
    async fn test_post_not_repeated_on_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(retrying_config(&server.uri())).unwrap();

        let err = transport
            .post::<serde_json::Value, _>("/v3/mail/send", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn test_post_repeated_on_rate_limit() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(retrying_config(&server.uri())).unwrap();

        let result: serde_json::Value = transport
            .post("/v3/mail/send", &serde_json::json!({}))
            .await
            .unwrap();
        assert!(result.is_null());
    }

    #[tokio::test]
    async fn test_delete_without_body() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/v3/templates/d-123"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();
        transport.delete("/v3/templates/d-123").await.unwrap();
    }

    #[tokio::test]
    async fn test_build_url_with_trailing_slash() {
        let transport = HttpTransport::new(create_config("http://localhost:8080/")).unwrap();

        let url = transport.build_url("v3/stats").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v3/stats");
    }
}
