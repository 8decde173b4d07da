//! Verified sender endpoints.

use crate::client::SendGridClient;
use crate::error::SendGridResult;
use serde::{Deserialize, Serialize};

pub struct SendersApi<'a> {
    client: &'a SendGridClient,
}

impl<'a> SendersApi<'a> {
    pub(crate) fn new(client: &'a SendGridClient) -> Self {
        Self { client }
    }

    /// List sender identities verified on the account.
    pub async fn list_verified(&self) -> SendGridResult<Vec<VerifiedSender>> {
        let response: VerifiedSendersResponse = self.client.http.get("/v3/verified_senders").await?;
        Ok(response.results)
    }
}

#[derive(Debug, Deserialize)]
struct VerifiedSendersResponse {
    #[serde(default)]
    results: Vec<VerifiedSender>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedSender {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub from_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    #[serde(default)]
    pub verified: bool,
}
