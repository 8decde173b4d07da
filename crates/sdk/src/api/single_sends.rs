//! Marketing single send endpoints.

use super::resource_path;
use crate::client::SendGridClient;
use crate::error::SendGridResult;
use serde::{Deserialize, Serialize};

/// Single Sends API for one-off campaigns to contact lists.
pub struct SingleSendsApi<'a> {
    client: &'a SendGridClient,
}

impl<'a> SingleSendsApi<'a> {
    pub(crate) fn new(client: &'a SendGridClient) -> Self {
        Self { client }
    }

    /// Create a draft single send.
    pub async fn create(&self, single_send: &NewSingleSend) -> SendGridResult<SingleSend> {
        self.client
            .http
            .post("/v3/marketing/singlesends", single_send)
            .await
    }

    /// Schedule a single send for immediate delivery.
    pub async fn schedule_now(&self, single_send_id: &str) -> SendGridResult<ScheduleResponse> {
        self.client
            .http
            .put(
                &resource_path(&["v3", "marketing", "singlesends", single_send_id, "schedule"])?,
                &serde_json::json!({ "send_at": "now" }),
            )
            .await
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSingleSend {
    pub name: String,
    pub send_to: SendTo,
    pub email_config: EmailConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendTo {
    pub list_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailConfig {
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_content: Option<String>,
    pub sender_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suppression_group_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_unsubscribe_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleSend {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub send_at: String,
    pub status: String,
}
