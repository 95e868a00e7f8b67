//! Action parsing - turns a free-text model reply into a tool invocation
//!
//! The model is asked to end every reply with a fenced `action` block holding
//! `{"tool_name": ..., "args": {...}}`. Parsing never fails: anything that
//! cannot be decoded becomes a call to the internal `error` tool, so the model
//! sees what went wrong on its next turn.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

use crate::extract::extract_markdown_block;

/// Fence tag that marks the action block
pub const ACTION_BLOCK: &str = "action";

/// Tool name used for synthesized error actions
pub const ERROR_TOOL: &str = "error";

/// A tool invocation requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub tool_name: String,
    pub args: Value,
}

impl Action {
    /// Create an action
    pub fn new(tool_name: impl Into<String>, args: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            args,
        }
    }

    /// Create an action that reports `message` through the error tool
    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        debug!(%message, "Action::error: called");
        Self::new(ERROR_TOOL, json!({ "message": message }))
    }

    /// Check if this is a synthesized error action
    pub fn is_error(&self) -> bool {
        self.tool_name == ERROR_TOOL
    }
}

/// Why an action could not be decoded
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Malformed JSON in action block.")]
    MalformedJson(#[source] serde_json::Error),

    #[error("Missing required fields in action JSON.")]
    MissingFields,
}

/// Decode the action block of `response`
///
/// Without an `action` block the whole reply is tried as the payload.
pub fn try_parse_action(response: &str) -> Result<Action, ActionError> {
    debug!(response_len = response.len(), "try_parse_action: called");
    let payload = extract_markdown_block(response, ACTION_BLOCK);

    let value: Value = serde_json::from_str(payload).map_err(ActionError::MalformedJson)?;

    let Value::Object(mut object) = value else {
        debug!("try_parse_action: payload is not an object");
        return Err(ActionError::MissingFields);
    };

    let args = object.remove("args").ok_or(ActionError::MissingFields)?;
    let tool_name = match object.remove("tool_name") {
        Some(Value::String(name)) => name,
        // Only presence is checked; other values dispatch as unknown tools
        Some(other) => {
            debug!(%other, "try_parse_action: tool_name is not a string");
            other.to_string()
        }
        None => {
            debug!("try_parse_action: tool_name missing");
            return Err(ActionError::MissingFields);
        }
    };

    debug!(%tool_name, "try_parse_action: decoded");
    Ok(Action { tool_name, args })
}

/// Decode the action block of `response`, falling back to an error action
pub fn parse_action(response: &str) -> Action {
    match try_parse_action(response) {
        Ok(action) => action,
        Err(e) => {
            debug!(error = %e, "parse_action: falling back to error action");
            Action::error(e.to_string())
        }
    }
}
