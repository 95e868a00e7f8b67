//! Tool trait definition

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::context::ToolContext;

/// A tool that can be called by the LLM
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches the action's tool_name)
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Internal tools are dispatchable but never advertised to the model
    fn is_internal(&self) -> bool {
        false
    }

    /// Execute the tool
    async fn execute(&self, args: &Value, ctx: &ToolContext) -> ToolResult;
}

/// Result of a tool execution
///
/// Serializes as `{"result": ...}`, `{"terminate": "..."}` or `{"error": "..."}`,
/// which is exactly the observation text fed back to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolResult {
    Result(Value),
    Terminate(String),
    Error(String),
}

impl ToolResult {
    /// Create a successful result
    pub fn success(content: impl Into<Value>) -> Self {
        debug!("ToolResult::success: called");
        Self::Result(content.into())
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        debug!("ToolResult::error: called");
        Self::Error(message.into())
    }

    /// Create a termination result
    pub fn terminate(message: impl Into<String>) -> Self {
        debug!("ToolResult::terminate: called");
        Self::Terminate(message.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The termination message, if this result ends the loop
    pub fn termination(&self) -> Option<&str> {
        match self {
            Self::Terminate(message) => Some(message),
            _ => None,
        }
    }

    /// Compact JSON text appended to the conversation
    pub fn to_observation(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
