pub mod account;
pub mod contacts;
pub mod mail;
pub mod templates;
mod registry;

pub use account::{GetStatsTool, ListSuppressionGroupsTool, ListVerifiedSendersTool, ValidateEmailTool};
pub use contacts::{
    AddContactsToListTool, CreateContactListTool, DeleteContactListTool, GetContactListTool,
    ListContactListsTool, RemoveContactsFromListTool,
};
pub use mail::{SendEmailTool, SendToListTool};
pub use registry::{
    json_schema_array, json_schema_boolean, json_schema_integer, json_schema_object,
    json_schema_string, Tool, ToolCatalog, ToolTier,
};
pub use templates::{CreateTemplateTool, DeleteTemplateTool, GetTemplateTool, ListTemplatesTool};

use crate::error::ToolFault;
use crate::protocol::CallToolResult;
use mailrelay_sdk::SendGridClient;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Every tool backed by the SendGrid client, in catalog order.
pub fn sendgrid_tools(client: Arc<SendGridClient>) -> Vec<Arc<dyn Tool>> {
    vec![
        // Mail
        Arc::new(SendEmailTool::new(client.clone())),
        Arc::new(SendToListTool::new(client.clone())),
        // Contact lists
        Arc::new(ListContactListsTool::new(client.clone())),
        Arc::new(GetContactListTool::new(client.clone())),
        Arc::new(CreateContactListTool::new(client.clone())),
        Arc::new(DeleteContactListTool::new(client.clone())),
        Arc::new(AddContactsToListTool::new(client.clone())),
        Arc::new(RemoveContactsFromListTool::new(client.clone())),
        // Templates
        Arc::new(ListTemplatesTool::new(client.clone())),
        Arc::new(GetTemplateTool::new(client.clone())),
        Arc::new(CreateTemplateTool::new(client.clone())),
        Arc::new(DeleteTemplateTool::new(client.clone())),
        // Account
        Arc::new(ValidateEmailTool::new(client.clone())),
        Arc::new(GetStatsTool::new(client.clone())),
        Arc::new(ListVerifiedSendersTool::new(client.clone())),
        Arc::new(ListSuppressionGroupsTool::new(client)),
    ]
}

/// Build the catalog of SendGrid tools.
pub fn build_catalog(client: Arc<SendGridClient>) -> Result<ToolCatalog, ToolFault> {
    ToolCatalog::build(sendgrid_tools(client))
}

/// Deserialize normalized arguments into a tool's argument type.
pub(crate) fn parse_args<T: DeserializeOwned>(
    tool: &str,
    arguments: serde_json::Value,
) -> Result<T, ToolFault> {
    serde_json::from_value(arguments)
        .map_err(|e| ToolFault::invalid_arguments(format!("Invalid arguments for {}: {}", tool, e)))
}

/// Render a value as pretty JSON text content.
pub(crate) fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, ToolFault> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| ToolFault::generic(format!("Failed to encode result: {}", e)))?;
    Ok(CallToolResult::text(text))
}
