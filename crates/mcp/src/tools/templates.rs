// Dynamic template tools

use crate::error::ToolFault;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_result, json_schema_object, json_schema_string, parse_args, Tool, ToolTier};
use mailrelay_sdk::api::NewTemplateVersion;
use mailrelay_sdk::SendGridClient;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct TemplateIdArgs {
    template_id: String,
}

fn template_id_schema() -> serde_json::Value {
    json_schema_string("Dynamic template ID (d-...)")
}

/// Tool to list dynamic templates
pub struct ListTemplatesTool {
    client: Arc<SendGridClient>,
}

impl ListTemplatesTool {
    pub fn new(client: Arc<SendGridClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListTemplatesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list-templates".to_string(),
            description: "List all dynamic email templates".to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
            annotations: None,
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult, ToolFault> {
        let templates = self.client.templates().list().await?;
        json_result(&templates)
    }
}

/// Tool to fetch a template and its versions
pub struct GetTemplateTool {
    client: Arc<SendGridClient>,
}

impl GetTemplateTool {
    pub fn new(client: Arc<SendGridClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for GetTemplateTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get-template".to_string(),
            description: "Get a dynamic template with all of its versions".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({ "template_id": template_id_schema() }),
                vec!["template_id"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolFault> {
        let args: TemplateIdArgs = parse_args("get-template", arguments)?;
        let template = self.client.templates().get(&args.template_id).await?;
        json_result(&template)
    }
}

/// Tool to create a dynamic template with an active first version
pub struct CreateTemplateTool {
    client: Arc<SendGridClient>,
}

impl CreateTemplateTool {
    pub fn new(client: Arc<SendGridClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct CreateTemplateArgs {
    name: String,
    subject: String,
    html_content: String,
    #[serde(default)]
    plain_content: Option<String>,
}

#[async_trait::async_trait]
impl Tool for CreateTemplateTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "create-template".to_string(),
            description: "Create a dynamic template with one active version. Subject and content may use Handlebars placeholders such as {{first_name}}.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "name": json_schema_string("Template name"),
                    "subject": json_schema_string("Subject line"),
                    "html_content": json_schema_string("HTML body"),
                    "plain_content": json_schema_string("Plain text body")
                }),
                vec!["name", "subject", "html_content"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolFault> {
        let args: CreateTemplateArgs = parse_args("create-template", arguments)?;

        let mut template = self.client.templates().create(&args.name).await?;
        let version = self
            .client
            .templates()
            .create_version(
                &template.id,
                &NewTemplateVersion {
                    name: args.name,
                    subject: args.subject,
                    html_content: args.html_content,
                    plain_content: args.plain_content,
                    active: 1,
                },
            )
            .await?;
        template.versions.push(version);

        json_result(&template)
    }

    fn tier(&self) -> ToolTier {
        ToolTier::Write
    }
}

/// Tool to delete a template
pub struct DeleteTemplateTool {
    client: Arc<SendGridClient>,
}

impl DeleteTemplateTool {
    pub fn new(client: Arc<SendGridClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for DeleteTemplateTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "delete-template".to_string(),
            description: "Delete a dynamic template and all of its versions".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({ "template_id": template_id_schema() }),
                vec!["template_id"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolFault> {
        let args: TemplateIdArgs = parse_args("delete-template", arguments)?;
        self.client.templates().delete(&args.template_id).await?;
        Ok(CallToolResult::text(format!("Template {} deleted", args.template_id)))
    }

    fn tier(&self) -> ToolTier {
        ToolTier::Destructive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{client_for, text_of};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_template_adds_active_version() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v3/templates"))
            .and(body_json(json!({"name": "Welcome", "generation": "dynamic"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "d-1", "name": "Welcome", "generation": "dynamic", "versions": []
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v3/templates/d-1/versions"))
            .and(body_json(json!({
                "name": "Welcome",
                "subject": "Hi {{first_name}}",
                "html_content": "<p>Welcome</p>",
                "active": 1
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "v-1", "template_id": "d-1", "active": 1, "subject": "Hi {{first_name}}"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = CreateTemplateTool::new(client_for(&server))
            .execute(json!({
                "name": "Welcome",
                "subject": "Hi {{first_name}}",
                "html_content": "<p>Welcome</p>"
            }))
            .await
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(parsed["id"], "d-1");
        assert_eq!(parsed["versions"][0]["id"], "v-1");
    }

    #[tokio::test]
    async fn test_delete_template() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/v3/templates/d-9"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let result = DeleteTemplateTool::new(client_for(&server))
            .execute(json!({"template_id": "d-9"}))
            .await
            .unwrap();

        assert_eq!(text_of(&result), "Template d-9 deleted");
    }
}
