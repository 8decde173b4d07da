//! Mail send endpoint.

use crate::client::SendGridClient;
use crate::error::SendGridResult;
use serde::{Deserialize, Serialize};

/// Mail API for sending transactional email.
pub struct MailApi<'a> {
    client: &'a SendGridClient,
}

impl<'a> MailApi<'a> {
    pub(crate) fn new(client: &'a SendGridClient) -> Self {
        Self { client }
    }

    /// Send a message. SendGrid accepts with `202` and no body.
    pub async fn send(&self, message: &SendMailRequest) -> SendGridResult<()> {
        let _: serde_json::Value = self.client.http.post("/v3/mail/send", message).await?;
        Ok(())
    }
}

/// Body of `POST /v3/mail/send`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMailRequest {
    pub personalizations: Vec<Personalization>,
    pub from: EmailAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<EmailAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

/// Recipients and per-recipient data of a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Personalization {
    pub to: Vec<EmailAddress>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<EmailAddress>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<EmailAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_template_data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EmailAddress {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }
}

/// A body part; `content_type` is a MIME type such as `text/plain`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(rename = "type")]
    pub content_type: String,
    pub value: String,
}

impl Content {
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            content_type: "text/plain".to_string(),
            value: value.into(),
        }
    }

    pub fn html(value: impl Into<String>) -> Self {
        Self {
            content_type: "text/html".to_string(),
            value: value.into(),
        }
    }
}

/// An attachment. `content` must already be base64 encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub content: String,
    pub filename: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disposition: Option<String>,
}
