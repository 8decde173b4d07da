//! Main client for the SendGrid SDK.

use crate::api::*;
use crate::config::{ClientConfig, RetryConfig, DEFAULT_BASE_URL};
use crate::error::{SendGridError, SendGridResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main client for interacting with the SendGrid v3 API.
#[derive(Debug, Clone)]
pub struct SendGridClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl SendGridClient {
    /// Create a new client builder.
    pub fn builder() -> SendGridClientBuilder {
        SendGridClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> SendGridResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Get the mail send API.
    pub fn mail(&self) -> MailApi<'_> {
        MailApi::new(self)
    }

    /// Get the contact lists API.
    pub fn lists(&self) -> ListsApi<'_> {
        ListsApi::new(self)
    }

    /// Get the contacts API.
    pub fn contacts(&self) -> ContactsApi<'_> {
        ContactsApi::new(self)
    }

    /// Get the dynamic templates API.
    pub fn templates(&self) -> TemplatesApi<'_> {
        TemplatesApi::new(self)
    }

    /// Get the single sends API.
    pub fn single_sends(&self) -> SingleSendsApi<'_> {
        SingleSendsApi::new(self)
    }

    /// Get the verified senders API.
    pub fn senders(&self) -> SendersApi<'_> {
        SendersApi::new(self)
    }

    /// Get the email validation API.
    pub fn validations(&self) -> ValidationsApi<'_> {
        ValidationsApi::new(self)
    }

    /// Get the stats API.
    pub fn stats(&self) -> StatsApi<'_> {
        StatsApi::new(self)
    }

    /// Get the suppression groups API.
    pub fn suppressions(&self) -> SuppressionsApi<'_> {
        SuppressionsApi::new(self)
    }
}

/// Builder for creating a SendGridClient.
pub struct SendGridClientBuilder {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    retry_config: RetryConfig,
}

impl SendGridClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
            retry_config: RetryConfig::default(),
        }
    }

    /// Override the API host (useful for proxies and tests).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry configuration.
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Build the client.
    pub fn build(self) -> SendGridResult<SendGridClient> {
        let api_key = self
            .api_key
            .ok_or_else(|| SendGridError::Config("api_key is required".to_string()))?;

        let base_url = Url::parse(&self.base_url)?;

        let config = ClientConfig {
            base_url,
            api_key,
            timeout: self.timeout,
            retry_config: self.retry_config,
        };

        SendGridClient::from_config(config)
    }
}

impl Default for SendGridClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
