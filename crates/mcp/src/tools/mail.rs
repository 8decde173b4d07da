// Mail tools: transactional sends and single sends to contact lists

use crate::error::ToolFault;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    json_schema_array, json_schema_integer, json_schema_object, json_schema_string, parse_args,
    Tool, ToolTier,
};
use base64::Engine;
use mailrelay_sdk::api::{
    Attachment, Content, EmailAddress, EmailConfig, NewSingleSend, Personalization,
    SendMailRequest, SendTo,
};
use mailrelay_sdk::SendGridClient;
use serde::Deserialize;
use std::sync::Arc;

/// One address or a list of addresses.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Recipients {
    One(String),
    Many(Vec<String>),
}

impl Recipients {
    fn into_addresses(self) -> Vec<EmailAddress> {
        match self {
            Recipients::One(email) => vec![EmailAddress::new(email)],
            Recipients::Many(emails) => emails.into_iter().map(EmailAddress::new).collect(),
        }
    }
}

fn addresses(recipients: Option<Recipients>) -> Vec<EmailAddress> {
    recipients.map(Recipients::into_addresses).unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct AttachmentArgs {
    filename: String,
    content: String,
    #[serde(rename = "type", default)]
    mime_type: Option<String>,
    /// `"base64"` when `content` is already encoded.
    #[serde(default)]
    encoding: Option<String>,
}

impl AttachmentArgs {
    fn into_attachment(self) -> Result<Attachment, ToolFault> {
        let content = match self.encoding.as_deref() {
            None | Some("utf8") | Some("text") => {
                base64::engine::general_purpose::STANDARD.encode(self.content.as_bytes())
            }
            Some("base64") => self.content,
            Some(other) => {
                return Err(ToolFault::invalid_arguments(format!(
                    "Unsupported attachment encoding for {}: {}",
                    self.filename, other
                )))
            }
        };
        Ok(Attachment {
            content,
            filename: self.filename,
            mime_type: self.mime_type,
            disposition: Some("attachment".to_string()),
        })
    }
}

/// Tool to send a transactional email
pub struct SendEmailTool {
    client: Arc<SendGridClient>,
}

impl SendEmailTool {
    pub fn new(client: Arc<SendGridClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct SendEmailArgs {
    to: Recipients,
    from: String,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    html: Option<String>,
    #[serde(default)]
    cc: Option<Recipients>,
    #[serde(default)]
    bcc: Option<Recipients>,
    #[serde(default)]
    reply_to: Option<String>,
    #[serde(default)]
    template_id: Option<String>,
    #[serde(default)]
    dynamic_template_data: Option<serde_json::Value>,
    #[serde(default)]
    attachments: Vec<AttachmentArgs>,
}

impl SendEmailArgs {
    fn into_request(self) -> Result<SendMailRequest, ToolFault> {
        let to = self.to.into_addresses();
        if to.is_empty() {
            return Err(ToolFault::invalid_arguments("At least one recipient is required"));
        }
        if self.template_id.is_none() {
            if self.subject.is_none() {
                return Err(ToolFault::invalid_arguments(
                    "subject is required unless template_id is set",
                ));
            }
            if self.text.is_none() && self.html.is_none() {
                return Err(ToolFault::invalid_arguments(
                    "One of text, html or template_id is required",
                ));
            }
        }

        let mut content = Vec::new();
        if let Some(text) = self.text {
            content.push(Content::plain(text));
        }
        if let Some(html) = self.html {
            content.push(Content::html(html));
        }

        let attachments = self
            .attachments
            .into_iter()
            .map(AttachmentArgs::into_attachment)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SendMailRequest {
            personalizations: vec![Personalization {
                to,
                cc: addresses(self.cc),
                bcc: addresses(self.bcc),
                subject: None,
                dynamic_template_data: self.dynamic_template_data,
            }],
            from: EmailAddress::new(self.from),
            reply_to: self.reply_to.map(EmailAddress::new),
            subject: self.subject,
            content,
            template_id: self.template_id,
            attachments,
        })
    }
}

fn recipients_schema(description: &str) -> serde_json::Value {
    serde_json::json!({
        "description": description,
        "oneOf": [
            { "type": "string" },
            { "type": "array", "items": { "type": "string" } }
        ]
    })
}

#[async_trait::async_trait]
impl Tool for SendEmailTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "send-email".to_string(),
            description: "Send an email through SendGrid. Provide text and/or html content, or a dynamic template_id with dynamic_template_data.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "to": recipients_schema("Recipient email address, or a list of addresses"),
                    "from": json_schema_string("Sender email address (must be a verified sender)"),
                    "subject": json_schema_string("Subject line (optional when template_id is set)"),
                    "text": json_schema_string("Plain text body"),
                    "html": json_schema_string("HTML body"),
                    "cc": recipients_schema("CC address or addresses"),
                    "bcc": recipients_schema("BCC address or addresses"),
                    "reply_to": json_schema_string("Reply-To address"),
                    "template_id": json_schema_string("Dynamic template ID (d-...)"),
                    "dynamic_template_data": {
                        "type": "object",
                        "description": "Handlebars data for the dynamic template"
                    },
                    "attachments": json_schema_array(
                        json_schema_object(
                            serde_json::json!({
                                "filename": json_schema_string("File name shown to the recipient"),
                                "content": json_schema_string("File content, plain text or base64"),
                                "type": json_schema_string("MIME type, e.g. text/csv"),
                                "encoding": {
                                    "type": "string",
                                    "enum": ["utf8", "base64"],
                                    "description": "Encoding of content (default: utf8)"
                                }
                            }),
                            vec!["filename", "content"],
                        ),
                        "Files to attach",
                    )
                }),
                vec!["to", "from"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolFault> {
        let args: SendEmailArgs = parse_args("send-email", arguments)?;
        let request = args.into_request()?;
        let recipients = request
            .personalizations
            .iter()
            .flat_map(|p| p.to.iter().map(|a| a.email.as_str()))
            .collect::<Vec<_>>()
            .join(", ");

        self.client.mail().send(&request).await?;

        Ok(CallToolResult::text(format!("Email sent to {}", recipients)))
    }

    fn tier(&self) -> ToolTier {
        ToolTier::Send
    }
}

/// Tool to send a one-off campaign to contact lists
pub struct SendToListTool {
    client: Arc<SendGridClient>,
}

impl SendToListTool {
    pub fn new(client: Arc<SendGridClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct SendToListArgs {
    name: String,
    list_ids: Vec<String>,
    subject: String,
    html_content: String,
    #[serde(default)]
    plain_content: Option<String>,
    sender_id: u64,
    #[serde(default)]
    suppression_group_id: Option<u64>,
    #[serde(default)]
    custom_unsubscribe_url: Option<String>,
}

#[async_trait::async_trait]
impl Tool for SendToListTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "send-to-list".to_string(),
            description: "Send an email to one or more contact lists as a SendGrid Single Send, delivered immediately. Requires either suppression_group_id or custom_unsubscribe_url.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "name": json_schema_string("Name of the single send"),
                    "list_ids": json_schema_array(json_schema_string("Contact list ID"), "Contact lists to send to"),
                    "subject": json_schema_string("Subject line"),
                    "html_content": json_schema_string("HTML body"),
                    "plain_content": json_schema_string("Plain text body (generated from HTML if omitted)"),
                    "sender_id": json_schema_integer("ID of a verified sender (see list-verified-senders)"),
                    "suppression_group_id": json_schema_integer("Unsubscribe group ID (see list-suppression-groups)"),
                    "custom_unsubscribe_url": json_schema_string("Custom unsubscribe URL, instead of a suppression group")
                }),
                vec!["name", "list_ids", "subject", "html_content", "sender_id"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolFault> {
        let args: SendToListArgs = parse_args("send-to-list", arguments)?;
        if args.list_ids.is_empty() {
            return Err(ToolFault::invalid_arguments("list_ids must not be empty"));
        }
        if args.suppression_group_id.is_none() && args.custom_unsubscribe_url.is_none() {
            return Err(ToolFault::invalid_arguments(
                "Either suppression_group_id or custom_unsubscribe_url is required",
            ));
        }

        let single_send = self
            .client
            .single_sends()
            .create(&NewSingleSend {
                name: args.name,
                send_to: SendTo {
                    list_ids: args.list_ids,
                },
                email_config: EmailConfig {
                    subject: args.subject,
                    html_content: Some(args.html_content),
                    plain_content: args.plain_content,
                    sender_id: args.sender_id,
                    suppression_group_id: args.suppression_group_id,
                    custom_unsubscribe_url: args.custom_unsubscribe_url,
                },
            })
            .await?;

        let schedule = self.client.single_sends().schedule_now(&single_send.id).await?;

        Ok(CallToolResult::text(format!(
            "Single send \"{}\" ({}) {} for {}",
            single_send.name, single_send.id, schedule.status, schedule.send_at
        )))
    }

    fn tier(&self) -> ToolTier {
        ToolTier::Send
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
    async fn test_send_email_builds_sendgrid_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .and(body_json(json!({
                "personalizations": [{"to": [{"email": "a@example.com"}]}],
                "from": {"email": "b@example.com"},
                "subject": "hi",
                "content": [{"type": "text/plain", "value": "hello"}]
            })))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let tool = SendEmailTool::new(client_for(&server));
        let result = tool
            .execute(json!({
                "to": "a@example.com",
                "from": "b@example.com",
                "subject": "hi",
                "text": "hello"
            }))
            .await
            .unwrap();

        assert_eq!(text_of(&result), "Email sent to a@example.com");
    }

    #[tokio::test]
    async fn test_send_email_service_errors_surface() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "errors": [
                    {"message": "The from address does not match a verified Sender Identity.", "field": "from"}
                ]
            })))
            .mount(&server)
            .await;

        let tool = SendEmailTool::new(client_for(&server));
        let err = tool
            .execute(json!({
                "to": ["a@example.com"],
                "from": "nobody@example.com",
                "subject": "hi",
                "html": "<p>hello</p>"
            }))
            .await
            .unwrap_err();

        match err {
            ToolFault::Service { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field.as_deref(), Some("from"));
            }
            other => panic!("expected service fault, got {:?}", other),
        }
    }

    #[test]
    fn test_template_send_needs_no_subject() {
        let args: SendEmailArgs = serde_json::from_value(json!({
            "to": ["a@example.com", "c@example.com"],
            "from": "b@example.com",
            "template_id": "d-123",
            "dynamic_template_data": {"first_name": "Ada"}
        }))
        .unwrap();

        let request = args.into_request().unwrap();
        assert_eq!(request.personalizations[0].to.len(), 2);
        assert!(request.content.is_empty());
        assert_eq!(
            request.personalizations[0].dynamic_template_data,
            Some(json!({"first_name": "Ada"}))
        );
    }

    #[test]
    fn test_missing_body_is_invalid() {
        let args: SendEmailArgs = serde_json::from_value(json!({
            "to": "a@example.com",
            "from": "b@example.com",
            "subject": "hi"
        }))
        .unwrap();

        assert!(matches!(args.into_request(), Err(ToolFault::InvalidArguments(_))));
    }

    #[test]
    fn test_plain_attachment_is_base64_encoded() {
        let args: SendEmailArgs = serde_json::from_value(json!({
            "to": "a@example.com",
            "from": "b@example.com",
            "subject": "report",
            "text": "attached",
            "attachments": [
                {"filename": "r.csv", "content": "a,b\n1,2\n", "type": "text/csv"},
                {"filename": "x.bin", "content": "AAEC", "encoding": "base64"}
            ]
        }))
        .unwrap();

        let request = args.into_request().unwrap();
        assert_eq!(request.attachments[0].content, "YSxiCjEsMgo=");
        assert_eq!(request.attachments[1].content, "AAEC");
    }

    #[tokio::test]
    async fn test_send_to_list_ids_are_integers() {
        let server = MockServer::start().await;
        let schema = SendToListTool::new(client_for(&server)).schema().input_schema;

        for field in ["sender_id", "suppression_group_id"] {
            assert_eq!(schema["properties"][field]["type"], "integer", "{}", field);
            assert_eq!(schema["properties"][field]["minimum"], 0, "{}", field);
        }
    }

    #[tokio::test]
    async fn test_send_to_list_requires_unsubscribe_option() {
        let server = MockServer::start().await;
        let tool = SendToListTool::new(client_for(&server));

        let err = tool
            .execute(json!({
                "name": "Launch",
                "list_ids": ["l1"],
                "subject": "We launched",
                "html_content": "<p>hi</p>",
                "sender_id": 7
            }))
            .await
            .unwrap_err();

        assert!(matches!(err, ToolFault::InvalidArguments(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_to_list_creates_and_schedules() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v3/marketing/singlesends"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "ss-1", "name": "Launch", "status": "draft"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/v3/marketing/singlesends/ss-1/schedule"))
            .and(body_json(json!({"send_at": "now"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "send_at": "2026-10-19T10:00:00Z", "status": "scheduled"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tool = SendToListTool::new(client_for(&server));
        let result = tool
            .execute(json!({
                "name": "Launch",
                "list_ids": ["l1"],
                "subject": "We launched",
                "html_content": "<p>hi</p>",
                "sender_id": 7,
                "suppression_group_id": 42
            }))
            .await
            .unwrap();

        assert!(text_of(&result).contains("ss-1"));
        assert!(text_of(&result).contains("scheduled"));
    }
}
