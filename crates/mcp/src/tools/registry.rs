// Tool trait and the immutable catalog of registered tools

use crate::error::ToolFault;
use crate::protocol::{CallToolResult, ToolAnnotations, ToolSchema};
use std::collections::HashMap;
use std::sync::Arc;

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with normalized object arguments
    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolFault>;

    /// What the tool does to the email account
    fn tier(&self) -> ToolTier {
        ToolTier::Read
    }
}

/// Effect of a tool on the remote account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ToolTier {
    /// Read-only lookups
    Read,
    /// Creates or updates account resources
    Write,
    /// Deletes account resources
    Destructive,
    /// Delivers email to recipients
    Send,
}

impl ToolTier {
    fn annotations(self) -> ToolAnnotations {
        ToolAnnotations {
            read_only_hint: self == ToolTier::Read,
            destructive_hint: self == ToolTier::Destructive,
            open_world_hint: true,
        }
    }
}

struct CatalogEntry {
    schema: ToolSchema,
    tier: ToolTier,
    tool: Arc<dyn Tool>,
}

/// Registered tools in registration order. Never mutated after `build`.
pub struct ToolCatalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl ToolCatalog {
    /// Build the catalog, rejecting an empty set, blank names and duplicates.
    pub fn build(tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Result<Self, ToolFault> {
        let mut entries = Vec::new();
        let mut index = HashMap::new();

        for tool in tools {
            let tier = tool.tier();
            let mut schema = tool.schema();
            if schema.name.trim().is_empty() {
                return Err(ToolFault::Catalog("tool with empty name".to_string()));
            }
            if index.contains_key(&schema.name) {
                return Err(ToolFault::Catalog(format!(
                    "duplicate tool name: {}",
                    schema.name
                )));
            }
            if schema.annotations.is_none() {
                schema.annotations = Some(tier.annotations());
            }

            index.insert(schema.name.clone(), entries.len());
            entries.push(CatalogEntry { schema, tier, tool });
        }

        if entries.is_empty() {
            return Err(ToolFault::Catalog("no tools registered".to_string()));
        }

        Ok(Self { entries, index })
    }

    /// Get a tool by exact name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&i| self.entries[i].tool.clone())
    }

    /// Tier of a registered tool
    pub fn tier(&self, name: &str) -> Option<ToolTier> {
        self.index.get(name).map(|&i| self.entries[i].tier)
    }

    /// List all tool schemas, in registration order
    pub fn list_tools(&self) -> Vec<ToolSchema> {
        self.entries.iter().map(|e| e.schema.clone()).collect()
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for ToolCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| &e.schema.name))
            .finish()
    }
}

// Helper functions for creating tool schemas

pub fn json_schema_object(properties: serde_json::Value, required: Vec<&str>) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

/// Non-negative whole number, for numeric resource ids.
pub fn json_schema_integer(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "integer",
        "minimum": 0,
        "description": description
    })
}

pub fn json_schema_boolean(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "boolean",
        "description": description
    })
}

pub fn json_schema_array(items: serde_json::Value, description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "array",
        "items": items,
        "description": description
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NamedTool(&'static str, ToolTier);

    #[async_trait::async_trait]
    impl Tool for NamedTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: self.0.to_string(),
                description: format!("{} tool", self.0),
                input_schema: json_schema_object(serde_json::json!({}), vec![]),
                annotations: None,
            }
        }

        async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult, ToolFault> {
            Ok(CallToolResult::text(self.0))
        }

        fn tier(&self) -> ToolTier {
            self.1
        }
    }

    fn tool(name: &'static str) -> Arc<dyn Tool> {
        Arc::new(NamedTool(name, ToolTier::Read))
    }

    #[test]
    fn test_build_preserves_order() {
        let catalog = ToolCatalog::build(vec![tool("b"), tool("a"), tool("c")]).unwrap();
        let names: Vec<_> = catalog.list_tools().into_iter().map(|s| s.name).collect();

        assert_eq!(names, vec!["b", "a", "c"]);
        assert!(catalog.contains("a"));
        assert!(catalog.get("z").is_none());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = ToolCatalog::build(vec![tool("send-email"), tool("send-email")]).unwrap_err();
        assert_eq!(err, ToolFault::Catalog("duplicate tool name: send-email".to_string()));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let err = ToolCatalog::build(Vec::new()).unwrap_err();
        assert!(matches!(err, ToolFault::Catalog(_)));
    }

    #[test]
    fn test_annotations_follow_tier() {
        let catalog = ToolCatalog::build(vec![
            tool("read"),
            Arc::new(NamedTool("drop", ToolTier::Destructive)) as Arc<dyn Tool>,
        ])
        .unwrap();
        let schemas = catalog.list_tools();

        let read = schemas[0].annotations.as_ref().unwrap();
        assert!(read.read_only_hint);
        assert!(!read.destructive_hint);

        let drop = schemas[1].annotations.as_ref().unwrap();
        assert!(!drop.read_only_hint);
        assert!(drop.destructive_hint);
        assert_eq!(catalog.tier("drop"), Some(ToolTier::Destructive));
    }

    #[test]
    fn test_exact_match_lookup() {
        let catalog = ToolCatalog::build(vec![tool("send-email")]).unwrap();
        assert!(catalog.get("send-email").is_some());
        assert!(catalog.get("Send-Email").is_none());
        assert!(catalog.get("send-email ").is_none());
    }
}
