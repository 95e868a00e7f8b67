//! Built-in tools for the agent loop

mod list_files;
mod read_file;
mod report_error;
mod terminate;

pub use list_files::ListFilesTool;
pub use read_file::ReadFileTool;
pub use report_error::ReportErrorTool;
pub use terminate::TerminateTool;
