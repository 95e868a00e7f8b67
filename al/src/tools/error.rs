//! Tool error types

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during tool execution
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Missing required parameter: {name}")]
    MissingArgument { name: &'static str },

    #[error("File '{path}' not found.")]
    FileNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Fetch a required string argument from a tool's `args`
pub fn required_str<'a>(args: &'a Value, name: &'static str) -> Result<&'a str, ToolError> {
    args.get(name)
        .and_then(Value::as_str)
        .ok_or(ToolError::MissingArgument { name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_not_found_message() {
        let err = ToolError::FileNotFound {
            path: "missing.txt".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };

        assert_eq!(err.to_string(), "File 'missing.txt' not found.");
    }

    #[test]
    fn test_required_str() {
        let args = json!({ "file_name": "a.txt", "count": 3 });

        assert_eq!(required_str(&args, "file_name").unwrap(), "a.txt");

        let err = required_str(&args, "count").unwrap_err();
        assert_eq!(err.to_string(), "Missing required parameter: count");

        assert!(required_str(&Value::Null, "file_name").is_err());
        assert!(required_str(&json!(["file_name"]), "file_name").is_err());
    }
}
