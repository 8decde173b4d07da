//! Global email statistics endpoint.

use crate::client::SendGridClient;
use crate::error::SendGridResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub struct StatsApi<'a> {
    client: &'a SendGridClient,
}

impl<'a> StatsApi<'a> {
    pub(crate) fn new(client: &'a SendGridClient) -> Self {
        Self { client }
    }

    /// Fetch global stats for the given date range.
    pub async fn global(&self, query: &StatsQuery) -> SendGridResult<Vec<StatsEntry>> {
        self.client.http.get_with_query("/v3/stats", query).await
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsQuery {
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregated_by: Option<Aggregation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Day,
    Week,
    Month,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsEntry {
    pub date: String,
    #[serde(default)]
    pub stats: Vec<serde_json::Value>,
}
