//! list_files tool - list the entries of the working directory

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::tools::{Tool, ToolContext, ToolResult};

/// List the names of the entries in the working directory
pub struct ListFilesTool;

#[async_trait]
impl Tool for ListFilesTool {
    fn name(&self) -> &'static str {
        "list_files"
    }

    fn description(&self) -> &'static str {
        "Returns a list of files in the directory."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _args: &Value, ctx: &ToolContext) -> ToolResult {
        debug!(working_dir = ?ctx.working_dir, "ListFilesTool::execute: called");
        let mut dir = match tokio::fs::read_dir(&ctx.working_dir).await {
            Ok(d) => d,
            Err(e) => {
                debug!(%e, "ListFilesTool::execute: failed to read directory");
                return ToolResult::error(e.to_string());
            }
        };

        let mut entries = Vec::new();
        loop {
            match dir.next_entry().await {
                Ok(Some(entry)) => entries.push(entry.file_name().to_string_lossy().to_string()),
                Ok(None) => break,
                Err(e) => {
                    debug!(%e, "ListFilesTool::execute: failed to read entry");
                    return ToolResult::error(e.to_string());
                }
            }
        }

        entries.sort();
        debug!(entries_count = %entries.len(), "ListFilesTool::execute: entries collected");
        ToolResult::success(entries)
    }
}
