//! ToolExecutor - dispatches decoded actions to tools

use serde::Serialize;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use tracing::debug;

use crate::action::Action;

use super::builtin::{ListFilesTool, ReadFileTool, ReportErrorTool, TerminateTool};
use super::{Tool, ToolContext, ToolResult};

/// Tool description advertised to the model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Manages tool execution for an agent run
pub struct ToolExecutor {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolExecutor {
    /// Create executor with the standard tools
    pub fn standard() -> Self {
        debug!("ToolExecutor::standard: called");
        let mut executor = Self::empty();
        executor.add_tool(Box::new(ListFilesTool));
        executor.add_tool(Box::new(ReadFileTool));
        executor.add_tool(Box::new(TerminateTool));
        executor.add_tool(Box::new(ReportErrorTool));
        executor
    }

    /// Create an empty executor (for testing)
    pub fn empty() -> Self {
        debug!("ToolExecutor::empty: called");
        Self { tools: HashMap::new() }
    }

    /// Add a tool to the executor
    pub fn add_tool(&mut self, tool: Box<dyn Tool>) {
        debug!(tool_name = %tool.name(), "ToolExecutor::add_tool: called");
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Definitions of the advertised tools, sorted by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        debug!("ToolExecutor::definitions: called");
        let mut defs: Vec<ToolDefinition> = self
            .tools
            .values()
            .filter(|t| !t.is_internal())
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.input_schema(),
            })
            .collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Advertised tools as `{ name: { description, parameters } }`
    pub fn prompt_json(&self) -> Value {
        debug!("ToolExecutor::prompt_json: called");
        let tools: Map<String, Value> = self
            .definitions()
            .into_iter()
            .map(|d| {
                (
                    d.name,
                    json!({ "description": d.description, "parameters": d.input_schema }),
                )
            })
            .collect();
        Value::Object(tools)
    }

    /// Execute a decoded action
    pub async fn execute(&self, action: &Action, ctx: &ToolContext) -> ToolResult {
        debug!(tool_name = %action.tool_name, exec_id = %ctx.exec_id, "ToolExecutor::execute: called");
        match self.tools.get(&action.tool_name) {
            Some(tool) => {
                debug!("ToolExecutor::execute: tool found, executing");
                tool.execute(&action.args, ctx).await
            }
            None => {
                debug!("ToolExecutor::execute: unknown tool");
                ToolResult::error(format!("Unknown action: {}", action.tool_name))
            }
        }
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        debug!(%name, "ToolExecutor::has_tool: called");
        self.tools.contains_key(name)
    }

    /// Get tool names, sorted
    pub fn tool_names(&self) -> Vec<String> {
        debug!("ToolExecutor::tool_names: called");
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::standard()
    }
}
