// Contact list tools

use crate::error::ToolFault;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    json_result, json_schema_array, json_schema_boolean, json_schema_object, json_schema_string,
    parse_args, Tool, ToolTier,
};
use mailrelay_sdk::api::{Contact, UpsertContactsRequest};
use mailrelay_sdk::SendGridClient;
use serde::Deserialize;
use std::sync::Arc;

fn list_id_schema() -> serde_json::Value {
    json_schema_string("Contact list ID (see list-contact-lists)")
}

/// Tool to list all contact lists
pub struct ListContactListsTool {
    client: Arc<SendGridClient>,
}

impl ListContactListsTool {
    pub fn new(client: Arc<SendGridClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListContactListsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list-contact-lists".to_string(),
            description: "List all marketing contact lists with their IDs and contact counts".to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
            annotations: None,
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult, ToolFault> {
        let lists = self.client.lists().list().await?;
        json_result(&lists)
    }
}

/// Tool to fetch one contact list
pub struct GetContactListTool {
    client: Arc<SendGridClient>,
}

impl GetContactListTool {
    pub fn new(client: Arc<SendGridClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetContactListArgs {
    list_id: String,
    #[serde(default = "default_true")]
    include_sample: bool,
}

fn default_true() -> bool {
    true
}

#[async_trait::async_trait]
impl Tool for GetContactListTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get-contact-list".to_string(),
            description: "Get a contact list by ID, including a sample of up to 50 of its contacts".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "list_id": list_id_schema(),
                    "include_sample": json_schema_boolean("Include a contact sample (default: true)")
                }),
                vec!["list_id"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolFault> {
        let args: GetContactListArgs = parse_args("get-contact-list", arguments)?;
        let list = self.client.lists().get(&args.list_id, args.include_sample).await?;
        json_result(&list)
    }
}

/// Tool to create a contact list
pub struct CreateContactListTool {
    client: Arc<SendGridClient>,
}

impl CreateContactListTool {
    pub fn new(client: Arc<SendGridClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct CreateContactListArgs {
    name: String,
}

#[async_trait::async_trait]
impl Tool for CreateContactListTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "create-contact-list".to_string(),
            description: "Create a new marketing contact list".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "name": json_schema_string("Name of the new list")
                }),
                vec!["name"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolFault> {
        let args: CreateContactListArgs = parse_args("create-contact-list", arguments)?;
        let list = self.client.lists().create(&args.name).await?;
        json_result(&list)
    }

    fn tier(&self) -> ToolTier {
        ToolTier::Write
    }
}

/// Tool to delete a contact list
pub struct DeleteContactListTool {
    client: Arc<SendGridClient>,
}

impl DeleteContactListTool {
    pub fn new(client: Arc<SendGridClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ListIdArgs {
    list_id: String,
}

#[async_trait::async_trait]
impl Tool for DeleteContactListTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "delete-contact-list".to_string(),
            description: "Delete a contact list. The contacts themselves are kept.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({ "list_id": list_id_schema() }),
                vec!["list_id"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolFault> {
        let args: ListIdArgs = parse_args("delete-contact-list", arguments)?;
        self.client.lists().delete(&args.list_id).await?;
        Ok(CallToolResult::text(format!("Contact list {} deleted", args.list_id)))
    }

    fn tier(&self) -> ToolTier {
        ToolTier::Destructive
    }
}

/// Tool to add or update contacts on a list
pub struct AddContactsToListTool {
    client: Arc<SendGridClient>,
}

impl AddContactsToListTool {
    pub fn new(client: Arc<SendGridClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct AddContactsArgs {
    list_id: String,
    contacts: Vec<Contact>,
}

#[async_trait::async_trait]
impl Tool for AddContactsToListTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "add-contacts-to-list".to_string(),
            description: "Add contacts to a contact list, creating or updating them by email. The import runs asynchronously; the job ID is returned.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "list_id": list_id_schema(),
                    "contacts": json_schema_array(
                        json_schema_object(
                            serde_json::json!({
                                "email": json_schema_string("Contact email address"),
                                "first_name": json_schema_string("First name"),
                                "last_name": json_schema_string("Last name")
                            }),
                            vec!["email"],
                        ),
                        "Contacts to add",
                    )
                }),
                vec!["list_id", "contacts"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolFault> {
        let args: AddContactsArgs = parse_args("add-contacts-to-list", arguments)?;
        if args.contacts.is_empty() {
            return Err(ToolFault::invalid_arguments("contacts must not be empty"));
        }

        let count = args.contacts.len();
        let job = self
            .client
            .contacts()
            .upsert(&UpsertContactsRequest {
                list_ids: vec![args.list_id.clone()],
                contacts: args.contacts,
            })
            .await?;

        Ok(CallToolResult::text(format!(
            "Queued {} contact(s) for list {} (job {})",
            count, args.list_id, job.job_id
        )))
    }

    fn tier(&self) -> ToolTier {
        ToolTier::Write
    }
}

/// Tool to remove contacts from a list
pub struct RemoveContactsFromListTool {
    client: Arc<SendGridClient>,
}

impl RemoveContactsFromListTool {
    pub fn new(client: Arc<SendGridClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct RemoveContactsArgs {
    list_id: String,
    contact_ids: Vec<String>,
}

#[async_trait::async_trait]
impl Tool for RemoveContactsFromListTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "remove-contacts-from-list".to_string(),
            description: "Remove contacts from a contact list by contact ID. The contacts are not deleted from the account.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "list_id": list_id_schema(),
                    "contact_ids": json_schema_array(json_schema_string("Contact ID"), "Contacts to remove")
                }),
                vec!["list_id", "contact_ids"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolFault> {
        let args: RemoveContactsArgs = parse_args("remove-contacts-from-list", arguments)?;
        if args.contact_ids.is_empty() {
            return Err(ToolFault::invalid_arguments("contact_ids must not be empty"));
        }

        let job = self
            .client
            .lists()
            .remove_contacts(&args.list_id, &args.contact_ids)
            .await?;

        Ok(CallToolResult::text(format!(
            "Removing {} contact(s) from list {} (job {})",
            args.contact_ids.len(),
            args.list_id,
            job.job_id
        )))
    }

    fn tier(&self) -> ToolTier {
        ToolTier::Destructive
    }
}
