//! Dynamic transactional template endpoints.

use super::lists::PagedResult;
use super::resource_path;
use crate::client::SendGridClient;
use crate::error::SendGridResult;
use serde::{Deserialize, Serialize};

/// Templates API for dynamic transactional templates.
pub struct TemplatesApi<'a> {
    client: &'a SendGridClient,
}

impl<'a> TemplatesApi<'a> {
    pub(crate) fn new(client: &'a SendGridClient) -> Self {
        Self { client }
    }

    /// List dynamic templates.
    pub async fn list(&self) -> SendGridResult<Vec<Template>> {
        let response: PagedResult<Template> = self
            .client
            .http
            .get_with_query(
                "/v3/templates",
                &[("generations", "dynamic"), ("page_size", "200")],
            )
            .await?;
        Ok(response.result)
    }

    /// Get a template with all of its versions.
    pub async fn get(&self, template_id: &str) -> SendGridResult<Template> {
        self.client
            .http
            .get(&resource_path(&["v3", "templates", template_id])?)
            .await
    }

    /// Create an empty dynamic template.
    pub async fn create(&self, name: &str) -> SendGridResult<Template> {
        self.client
            .http
            .post(
                "/v3/templates",
                &CreateTemplateRequest {
                    name,
                    generation: "dynamic",
                },
            )
            .await
    }

    /// Add a version to an existing template.
    pub async fn create_version(
        &self,
        template_id: &str,
        version: &NewTemplateVersion,
    ) -> SendGridResult<TemplateVersion> {
        self.client
            .http
            .post(
                &resource_path(&["v3", "templates", template_id, "versions"])?,
                version,
            )
            .await
    }

    /// Delete a template and all of its versions.
    pub async fn delete(&self, template_id: &str) -> SendGridResult<()> {
        self.client
            .http
            .delete(&resource_path(&["v3", "templates", template_id])?)
            .await
    }
}

#[derive(Debug, Serialize)]
struct CreateTemplateRequest<'a> {
    name: &'a str,
    generation: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub versions: Vec<TemplateVersion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateVersion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// `1` when this is the version used for sends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTemplateVersion {
    pub name: String,
    pub subject: String,
    pub html_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_content: Option<String>,
    pub active: u8,
}
