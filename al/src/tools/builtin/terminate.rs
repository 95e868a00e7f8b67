//! terminate tool - signal that the agent is done

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::tools::{Tool, ToolContext, ToolResult, required_str};

/// Ends the run with a final message for the user
pub struct TerminateTool;

#[async_trait]
impl Tool for TerminateTool {
    fn name(&self) -> &'static str {
        "terminate"
    }

    fn description(&self) -> &'static str {
        "Terminates the conversation. No further actions or interactions are possible after this. Prints the provided message for the user."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "message": {
                    "type": "string",
                    "description": "Final message for the user"
                }
            },
            "required": ["message"]
        })
    }

    async fn execute(&self, args: &Value, ctx: &ToolContext) -> ToolResult {
        debug!(?args, "TerminateTool::execute: called");
        match required_str(args, "message") {
            Ok(message) => {
                info!(exec_id = %ctx.exec_id, "Termination signaled");
                ToolResult::terminate(message)
            }
            Err(e) => {
                debug!(%e, "TerminateTool::execute: missing message");
                ToolResult::error(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_terminate_basic() {
        let temp = tempdir().unwrap();
        let ctx = ToolContext::new(temp.path().to_path_buf(), "test-exec".to_string());

        let result = TerminateTool.execute(&json!({ "message": "Read both files." }), &ctx).await;
        assert_eq!(result.termination(), Some("Read both files."));
    }

    #[tokio::test]
    async fn test_terminate_missing_message() {
        let temp = tempdir().unwrap();
        let ctx = ToolContext::new(temp.path().to_path_buf(), "test-exec".to_string());

        let result = TerminateTool.execute(&json!({}), &ctx).await;
        assert!(result.termination().is_none());
        assert_eq!(result, ToolResult::error("Missing required parameter: message"));
    }
}
