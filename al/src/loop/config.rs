//! Loop configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::prompts::Goal;

/// Settings for one agent run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LoopConfig {
    /// Hard cap on model calls
    pub max_iterations: u32,

    /// Passed through to the completion request
    pub max_tokens: Option<u32>,

    /// Directory the tools operate in
    pub working_dir: PathBuf,

    /// Goals rendered into the system prompt
    pub goals: Vec<Goal>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            max_tokens: None,
            working_dir: PathBuf::from("."),
            goals: Vec::new(),
        }
    }
}

impl LoopConfig {
    /// Build from the application config
    pub fn from_config(config: &Config) -> Self {
        debug!("LoopConfig::from_config: called");
        Self {
            max_iterations: config.agent.max_iterations,
            max_tokens: config.llm.max_tokens,
            working_dir: config.agent.working_dir.clone(),
            goals: config.agent.goals.clone(),
        }
    }
}
