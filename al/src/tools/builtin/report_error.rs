//! error tool - echoes a parse failure back to the model

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::action::ERROR_TOOL;
use crate::tools::{Tool, ToolContext, ToolResult};

/// Turns a synthesized error action into an error observation
pub struct ReportErrorTool;

#[async_trait]
impl Tool for ReportErrorTool {
    fn name(&self) -> &'static str {
        ERROR_TOOL
    }

    fn description(&self) -> &'static str {
        "Reports a problem decoding the previous response."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "message": { "type": "string" }
            },
            "required": ["message"]
        })
    }

    fn is_internal(&self) -> bool {
        true
    }

    async fn execute(&self, args: &Value, _ctx: &ToolContext) -> ToolResult {
        debug!(?args, "ReportErrorTool::execute: called");
        match args.get("message") {
            Some(Value::String(message)) => ToolResult::error(message.clone()),
            Some(other) => ToolResult::error(other.to_string()),
            None => ToolResult::error("Unknown error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_report_error_echoes_message() {
        let temp = tempdir().unwrap();
        let ctx = ToolContext::new(temp.path().to_path_buf(), "test".to_string());

        let result = ReportErrorTool
            .execute(&json!({ "message": "Missing required fields in action JSON." }), &ctx)
            .await;
        assert_eq!(result, ToolResult::error("Missing required fields in action JSON."));
    }

    #[tokio::test]
    async fn test_report_error_without_message() {
        let temp = tempdir().unwrap();
        let ctx = ToolContext::new(temp.path().to_path_buf(), "test".to_string());

        assert_eq!(ReportErrorTool.execute(&json!(5), &ctx).await, ToolResult::error("Unknown error"));
        assert_eq!(
            ReportErrorTool.execute(&json!({ "message": 5 }), &ctx).await,
            ToolResult::error("5")
        );
    }

    #[test]
    fn test_report_error_is_internal() {
        assert!(ReportErrorTool.is_internal());
    }
}
