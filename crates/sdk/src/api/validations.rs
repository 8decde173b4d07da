//! Email address validation endpoint.

use crate::client::SendGridClient;
use crate::error::SendGridResult;
use serde::{Deserialize, Serialize};

pub struct ValidationsApi<'a> {
    client: &'a SendGridClient,
}

impl<'a> ValidationsApi<'a> {
    pub(crate) fn new(client: &'a SendGridClient) -> Self {
        Self { client }
    }

    /// Validate a single address. Requires an Email Address Validation key.
    pub async fn validate(&self, email: &str, source: Option<&str>) -> SendGridResult<EmailValidation> {
        let response: ValidationResponse = self
            .client
            .http
            .post("/v3/validations/email", &ValidateRequest { email, source })
            .await?;
        Ok(response.result)
    }
}

#[derive(Debug, Serialize)]
struct ValidateRequest<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ValidationResponse {
    result: EmailValidation,
}

/// Validation verdict. Detailed check results are kept in `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailValidation {
    pub email: String,
    pub verdict: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}
