//! Unsubscribe (suppression) group endpoints.

use crate::client::SendGridClient;
use crate::error::SendGridResult;
use serde::{Deserialize, Serialize};

pub struct SuppressionsApi<'a> {
    client: &'a SendGridClient,
}

impl<'a> SuppressionsApi<'a> {
    pub(crate) fn new(client: &'a SendGridClient) -> Self {
        Self { client }
    }

    /// List unsubscribe groups.
    pub async fn list_groups(&self) -> SendGridResult<Vec<SuppressionGroup>> {
        self.client.http.get("/v3/asm/groups").await
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuppressionGroup {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsubscribes: Option<u64>,
}
