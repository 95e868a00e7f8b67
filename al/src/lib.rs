//! agentloop - prompt-driven LLM agent
//!
//! A minimal agent: the model is asked to end each reply with a fenced
//! `action` block, the action is dispatched to a small set of local tools,
//! and the observation is fed back until the model terminates.
//!
//! # Modules
//!
//! - [`llm`] - LLM client trait with OpenAI-compatible and Ollama implementations
//! - [`extract`] - fenced block extraction from model output
//! - [`action`] - action decoding
//! - [`tools`] - tool system for file operations and termination
//! - [`r#loop`] - agent loop engine
//! - [`develop`] - three-step function developer
//! - [`repl`] - chat session and REPL
//! - [`prompts`] - Handlebars prompt templates
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod action;
pub mod cli;
pub mod config;
pub mod develop;
pub mod extract;
pub mod llm;
pub mod prompts;
pub mod repl;
pub mod tools;

// Note: 'loop' is a reserved keyword, so we use r#loop
#[path = "loop/mod.rs"]
pub mod r#loop;

// Re-export commonly used types
pub use action::{Action, ActionError, parse_action, try_parse_action};
pub use config::{Config, LlmConfig};
pub use develop::{DevelopOutcome, FunctionDeveloper, build_filename};
pub use extract::{extract_code_block, extract_markdown_block};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, Message, Role, create_client};
pub use prompts::{Goal, PromptLoader};
pub use r#loop::{LoopConfig, LoopEngine, LoopEvent, LoopOutcome, LoopStatus, Memory};
pub use repl::ChatSession;
pub use tools::{Tool, ToolContext, ToolError, ToolExecutor, ToolResult};
