// Resolves a tool name and runs its handler exactly once

use crate::error::ToolFault;
use crate::protocol::CallToolResult;
use crate::tools::ToolCatalog;
use futures::FutureExt;
use serde_json::{Map, Value};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Routes calls to catalog handlers. Does not translate failures.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    catalog: Arc<ToolCatalog>,
}

impl Dispatcher {
    pub fn new(catalog: Arc<ToolCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Invoke `name` with already-normalized arguments.
    ///
    /// Unknown names fail before any handler runs. A panicking handler is
    /// reported as [`ToolFault::Unknown`].
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<CallToolResult, ToolFault> {
        let tool = self
            .catalog
            .get(name)
            .ok_or_else(|| ToolFault::UnknownTool(name.to_string()))?;

        tracing::debug!(tool = name, tier = ?self.catalog.tier(name), "Dispatching tool call");

        match AssertUnwindSafe(tool.execute(Value::Object(arguments)))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(tool = name, "Tool handler panicked");
                Err(ToolFault::Unknown)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ToolSchema;
    use crate::tools::{json_schema_object, Tool};
    use serde_json::json;
    use std::sync::Mutex;

    /// Records every invocation and replies with a canned outcome.
    struct SpyTool {
        calls: Mutex<Vec<Value>>,
        outcome: fn() -> Result<CallToolResult, ToolFault>,
    }

    #[async_trait::async_trait]
    impl Tool for SpyTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "spy".to_string(),
                description: "records calls".to_string(),
                input_schema: json_schema_object(json!({}), vec![]),
                annotations: None,
            }
        }

        async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolFault> {
            self.calls.lock().unwrap().push(arguments);
            (self.outcome)()
        }
    }

    fn setup(outcome: fn() -> Result<CallToolResult, ToolFault>) -> (Dispatcher, Arc<SpyTool>) {
        let spy = Arc::new(SpyTool {
            calls: Mutex::new(Vec::new()),
            outcome,
        });
        let catalog = ToolCatalog::build(vec![spy.clone() as Arc<dyn Tool>]).unwrap();
        (Dispatcher::new(Arc::new(catalog)), spy)
    }

    fn args(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_unknown_tool_never_invokes_handler() {
        let (dispatcher, spy) = setup(|| Ok(CallToolResult::text("ok")));

        let err = dispatcher.call_tool("nope", Map::new()).await.unwrap_err();

        assert_eq!(err, ToolFault::UnknownTool("nope".to_string()));
        assert!(spy.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_known_tool_invoked_once_with_arguments() {
        let (dispatcher, spy) = setup(|| Ok(CallToolResult::text("ok")));

        let result = dispatcher
            .call_tool("spy", args(json!({"a": 1})))
            .await
            .unwrap();

        assert_eq!(result, CallToolResult::text("ok"));
        assert_eq!(*spy.calls.lock().unwrap(), vec![json!({"a": 1})]);
    }

    #[tokio::test]
    async fn test_handler_failure_returned_raw() {
        let (dispatcher, spy) = setup(|| Err(ToolFault::generic("boom")));

        let err = dispatcher.call_tool("spy", Map::new()).await.unwrap_err();

        assert_eq!(err, ToolFault::Generic("boom".to_string()));
        assert_eq!(spy.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_panicking_handler_is_unknown_fault() {
        let (dispatcher, _spy) = setup(|| std::panic::panic_any(42_u8));

        let err = dispatcher.call_tool("spy", Map::new()).await.unwrap_err();

        assert_eq!(err, ToolFault::Unknown);
    }
}
