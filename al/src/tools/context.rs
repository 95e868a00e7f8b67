//! ToolContext - execution context for tools

use std::path::{Path, PathBuf};
use tracing::debug;

/// Execution context for tools - scoped to a single agent run
///
/// Relative paths resolve against `working_dir`. Absolute paths are used
/// as-is; there is no sandbox.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Directory the file tools operate in
    pub working_dir: PathBuf,

    /// Run execution ID (for log correlation)
    pub exec_id: String,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new(working_dir: PathBuf, exec_id: String) -> Self {
        debug!(?working_dir, %exec_id, "ToolContext::new: called");
        Self { working_dir, exec_id }
    }

    /// Resolve a path relative to the working directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        debug!(?path, "ToolContext::resolve: called");
        if path.is_absolute() {
            debug!("ToolContext::resolve: path is absolute");
            path.to_path_buf()
        } else {
            debug!("ToolContext::resolve: path is relative, joining with working dir");
            self.working_dir.join(path)
        }
    }
}
