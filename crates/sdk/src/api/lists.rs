//! Marketing contact list endpoints.

use super::{resource_path, JobResponse};
use crate::client::SendGridClient;
use crate::error::SendGridResult;
use serde::{Deserialize, Serialize};

/// Lists API for managing marketing contact lists.
pub struct ListsApi<'a> {
    client: &'a SendGridClient,
}

impl<'a> ListsApi<'a> {
    pub(crate) fn new(client: &'a SendGridClient) -> Self {
        Self { client }
    }

    /// List all contact lists.
    pub async fn list(&self) -> SendGridResult<Vec<ContactList>> {
        let response: PagedResult<ContactList> = self
            .client
            .http
            .get_with_query("/v3/marketing/lists", &[("page_size", "1000")])
            .await?;
        Ok(response.result)
    }

    /// Get a list, optionally with a sample of its contacts.
    pub async fn get(&self, list_id: &str, contact_sample: bool) -> SendGridResult<ContactList> {
        let sample = if contact_sample { "true" } else { "false" };
        self.client
            .http
            .get_with_query(
                &resource_path(&["v3", "marketing", "lists", list_id])?,
                &[("contact_sample", sample)],
            )
            .await
    }

    /// Create a new list.
    pub async fn create(&self, name: &str) -> SendGridResult<ContactList> {
        self.client
            .http
            .post("/v3/marketing/lists", &CreateListRequest { name })
            .await
    }

    /// Delete a list. Contacts on it are kept.
    pub async fn delete(&self, list_id: &str) -> SendGridResult<()> {
        self.client
            .http
            .delete(&resource_path(&["v3", "marketing", "lists", list_id])?)
            .await
    }

    /// Remove contacts from a list by contact ID.
    pub async fn remove_contacts(
        &self,
        list_id: &str,
        contact_ids: &[String],
    ) -> SendGridResult<JobResponse> {
        self.client
            .http
            .delete_with_query(
                &resource_path(&["v3", "marketing", "lists", list_id, "contacts"])?,
                &[("contact_ids", contact_ids.join(","))],
            )
            .await
    }
}

#[derive(Debug, Serialize)]
struct CreateListRequest<'a> {
    name: &'a str,
}

/// Envelope of SendGrid's paged marketing endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct PagedResult<T> {
    #[serde(default = "Vec::new")]
    pub result: Vec<T>,
}

/// A marketing contact list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactList {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub contact_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_sample: Option<Vec<serde_json::Value>>,
}
