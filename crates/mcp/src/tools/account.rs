// Account-level lookups: validation, stats, senders, unsubscribe groups

use crate::error::ToolFault;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_result, json_schema_object, json_schema_string, parse_args, Tool};
use chrono::{Days, NaiveDate, Utc};
use mailrelay_sdk::api::{Aggregation, StatsQuery};
use mailrelay_sdk::SendGridClient;
use serde::Deserialize;
use std::sync::Arc;

/// Default look-back window for `get-stats`.
const DEFAULT_STATS_DAYS: u64 = 30;

/// Tool to validate an email address
pub struct ValidateEmailTool {
    client: Arc<SendGridClient>,
}

impl ValidateEmailTool {
    pub fn new(client: Arc<SendGridClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ValidateEmailArgs {
    email: String,
    #[serde(default)]
    source: Option<String>,
}

#[async_trait::async_trait]
impl Tool for ValidateEmailTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "validate-email".to_string(),
            description: "Check whether an email address is deliverable. Requires an API key with Email Address Validation access.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "email": json_schema_string("Address to validate"),
                    "source": json_schema_string("Free-form label for where the address came from, e.g. signup")
                }),
                vec!["email"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolFault> {
        let args: ValidateEmailArgs = parse_args("validate-email", arguments)?;
        let validation = self
            .client
            .validations()
            .validate(&args.email, args.source.as_deref())
            .await?;
        json_result(&validation)
    }
}

/// Tool to fetch global delivery statistics
pub struct GetStatsTool {
    client: Arc<SendGridClient>,
}

impl GetStatsTool {
    pub fn new(client: Arc<SendGridClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetStatsArgs {
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    aggregated_by: Option<Aggregation>,
}

impl GetStatsArgs {
    fn into_query(self, today: NaiveDate) -> Result<StatsQuery, ToolFault> {
        let start_date = self.start_date.unwrap_or_else(|| {
            today
                .checked_sub_days(Days::new(DEFAULT_STATS_DAYS))
                .unwrap_or(today)
        });
        if let Some(end) = self.end_date {
            if end < start_date {
                return Err(ToolFault::invalid_arguments(format!(
                    "end_date {} is before start_date {}",
                    end, start_date
                )));
            }
        }
        Ok(StatsQuery {
            start_date,
            end_date: self.end_date,
            aggregated_by: self.aggregated_by,
        })
    }
}

#[async_trait::async_trait]
impl Tool for GetStatsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get-stats".to_string(),
            description: "Get global email statistics (requests, deliveries, opens, clicks, bounces) for a date range".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "start_date": json_schema_string("First day, YYYY-MM-DD (default: 30 days ago)"),
                    "end_date": json_schema_string("Last day, YYYY-MM-DD (default: today)"),
                    "aggregated_by": {
                        "type": "string",
                        "enum": ["day", "week", "month"],
                        "description": "Bucket size (default: day)"
                    }
                }),
                vec![],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolFault> {
        let args: GetStatsArgs = parse_args("get-stats", arguments)?;
        let query = args.into_query(Utc::now().date_naive())?;
        let stats = self.client.stats().global(&query).await?;
        json_result(&stats)
    }
}

/// Tool to list verified senders
pub struct ListVerifiedSendersTool {
    client: Arc<SendGridClient>,
}

impl ListVerifiedSendersTool {
    pub fn new(client: Arc<SendGridClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListVerifiedSendersTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list-verified-senders".to_string(),
            description: "List verified sender identities. Their IDs are used as sender_id in send-to-list.".to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
            annotations: None,
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult, ToolFault> {
        let senders = self.client.senders().list_verified().await?;
        json_result(&senders)
    }
}

/// Tool to list unsubscribe groups
pub struct ListSuppressionGroupsTool {
    client: Arc<SendGridClient>,
}

impl ListSuppressionGroupsTool {
    pub fn new(client: Arc<SendGridClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListSuppressionGroupsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list-suppression-groups".to_string(),
            description: "List unsubscribe (suppression) groups. Their IDs are used as suppression_group_id in send-to-list.".to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
            annotations: None,
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult, ToolFault> {
        let groups = self.client.suppressions().list_groups().await?;
        json_result(&groups)
    }
}
