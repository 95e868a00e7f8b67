//! Prompt Template System
//!
//! Loads and renders `.pmt` (prompt template) files for the agent loop and
//! the function developer.
//!
//! Template loading chain:
//! 1. `.agentloop/prompts/{name}.pmt` (user override)
//! 2. Embedded fallback in code
//!
//! Templates use Handlebars syntax for variable substitution.

mod context;
pub mod embedded;
mod loader;

pub use context::{AgentPromptContext, DevelopPromptContext, Goal};
pub use loader::PromptLoader;
