//! Tool system for the agent loop
//!
//! Tools give the model a narrow window onto the local filesystem plus a way
//! to end the run. Each run gets a `ToolContext` whose working directory
//! relative paths resolve against.

mod context;
mod error;
mod executor;
mod traits;

pub mod builtin;

pub use context::ToolContext;
pub use error::{ToolError, required_str};
pub use executor::{ToolDefinition, ToolExecutor};
pub use traits::{Tool, ToolResult};
