//! read_file tool - read a file's full text

use async_trait::async_trait;
use serde_json::{Value, json};
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

use crate::tools::{Tool, ToolContext, ToolError, ToolResult, required_str};

/// Read a file's contents
pub struct ReadFileTool;

impl ReadFileTool {
    async fn read(args: &Value, ctx: &ToolContext) -> Result<String, ToolError> {
        let file_name = required_str(args, "file_name")?;
        let full_path = ctx.resolve(Path::new(file_name));
        debug!(?full_path, "ReadFileTool::read: resolved path");

        tokio::fs::read_to_string(&full_path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ToolError::FileNotFound {
                path: file_name.to_string(),
                source: e,
            },
            _ => ToolError::Io(e),
        })
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &'static str {
        "read_file"
    }

    fn description(&self) -> &'static str {
        "Reads the content of a specified file in the directory."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "file_name": {
                    "type": "string",
                    "description": "Name of the file to read, relative to the working directory"
                }
            },
            "required": ["file_name"]
        })
    }

    async fn execute(&self, args: &Value, ctx: &ToolContext) -> ToolResult {
        debug!(?args, "ReadFileTool::execute: called");
        match Self::read(args, ctx).await {
            Ok(content) => {
                debug!(bytes = content.len(), "ReadFileTool::execute: file read");
                ToolResult::success(content)
            }
            Err(e) => {
                debug!(%e, "ReadFileTool::execute: read failed");
                ToolResult::error(e.to_string())
            }
        }
    }
}
