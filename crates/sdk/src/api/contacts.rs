//! Marketing contacts endpoints.

use super::JobResponse;
use crate::client::SendGridClient;
use crate::error::SendGridResult;
use serde::{Deserialize, Serialize};

/// Contacts API.
pub struct ContactsApi<'a> {
    client: &'a SendGridClient,
}

impl<'a> ContactsApi<'a> {
    pub(crate) fn new(client: &'a SendGridClient) -> Self {
        Self { client }
    }

    /// Add or update contacts, optionally attaching them to lists.
    ///
    /// The import runs asynchronously on SendGrid's side; the returned job ID
    /// can be polled there.
    pub async fn upsert(&self, request: &UpsertContactsRequest) -> SendGridResult<JobResponse> {
        self.client.http.put("/v3/marketing/contacts", request).await
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertContactsRequest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub list_ids: Vec<String>,
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}
