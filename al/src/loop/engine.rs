//! LoopEngine - executes agent iterations
//!
//! Each iteration replays the system prompt and the full memory to the model,
//! decodes the action from its reply, dispatches it, and records the exchange.

use std::sync::Arc;

use eyre::WrapErr;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::action::{Action, parse_action};
use crate::llm::{CompletionRequest, LlmClient, StopReason, TokenUsage};
use crate::prompts::{AgentPromptContext, PromptLoader};
use crate::tools::{ToolContext, ToolExecutor, ToolResult};

use super::{LoopConfig, Memory};

/// Status of a loop execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopStatus {
    Running,
    Complete,
    Failed { reason: String },
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopOutcome {
    /// The model called `terminate`
    Terminated { message: String, iterations: u32 },
    /// The iteration cap was reached first
    MaxIterations { iterations: u32 },
}

/// Progress notifications for the console
#[derive(Debug, Clone, PartialEq)]
pub enum LoopEvent {
    IterationStarted { iteration: u32 },
    Thinking,
    Response { iteration: u32, text: String },
    ActionResult { iteration: u32, action: Action, result: ToolResult },
    Terminated { message: String },
    MaxIterationsReached,
}

/// Loop execution engine
pub struct LoopEngine {
    /// Execution ID
    pub exec_id: String,

    config: LoopConfig,
    llm: Arc<dyn LlmClient>,
    tool_executor: ToolExecutor,
    prompts: PromptLoader,
    memory: Memory,
    iteration: u32,
    status: LoopStatus,
    usage: TokenUsage,
    events: Option<UnboundedSender<LoopEvent>>,
}

impl LoopEngine {
    /// Create a new loop engine with the standard tools
    pub fn new(exec_id: String, config: LoopConfig, llm: Arc<dyn LlmClient>) -> Self {
        debug!(%exec_id, max_iterations = config.max_iterations, "LoopEngine::new: called");
        let prompts = PromptLoader::new(&config.working_dir);
        Self {
            exec_id,
            config,
            llm,
            tool_executor: ToolExecutor::standard(),
            prompts,
            memory: Memory::default(),
            iteration: 0,
            status: LoopStatus::Running,
            usage: TokenUsage::default(),
            events: None,
        }
    }

    /// Replace the tool executor
    pub fn with_tools(mut self, tool_executor: ToolExecutor) -> Self {
        debug!(exec_id = %self.exec_id, "with_tools: called");
        self.tool_executor = tool_executor;
        self
    }

    /// Replace the prompt loader
    pub fn with_prompts(mut self, prompts: PromptLoader) -> Self {
        debug!(exec_id = %self.exec_id, "with_prompts: called");
        self.prompts = prompts;
        self
    }

    /// Send progress events to `tx`
    pub fn with_events(mut self, tx: UnboundedSender<LoopEvent>) -> Self {
        debug!(exec_id = %self.exec_id, "with_events: called");
        self.events = Some(tx);
        self
    }

    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn status(&self) -> &LoopStatus {
        &self.status
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Tokens reported by the provider over the current run
    pub fn usage(&self) -> &TokenUsage {
        &self.usage
    }

    fn emit(&self, event: LoopEvent) {
        if let Some(tx) = &self.events
            && tx.send(event).is_err()
        {
            debug!(exec_id = %self.exec_id, "emit: event receiver dropped");
        }
    }

    /// Render the system prompt for this run
    pub fn system_prompt(&self) -> eyre::Result<String> {
        debug!(exec_id = %self.exec_id, "system_prompt: called");
        let context = AgentPromptContext::new(&self.tool_executor.prompt_json(), &self.config.goals);
        self.prompts.render("agent", &context)
    }

    /// Run the agent on `task` until it terminates or hits the iteration cap
    pub async fn run(&mut self, task: &str) -> eyre::Result<LoopOutcome> {
        debug!(exec_id = %self.exec_id, max_iterations = self.config.max_iterations, "run: called");
        info!(exec_id = %self.exec_id, "Starting agent run (max {} iterations)", self.config.max_iterations);

        self.memory = Memory::start(task);
        self.iteration = 0;
        self.status = LoopStatus::Running;
        self.usage = TokenUsage::default();

        let system_prompt = self.system_prompt().wrap_err("Failed to render agent prompt")?;
        let ctx = ToolContext::new(self.config.working_dir.clone(), self.exec_id.clone());

        while self.iteration < self.config.max_iterations {
            self.iteration += 1;
            let iteration = self.iteration;
            debug!(exec_id = %self.exec_id, %iteration, "run: iteration start");
            self.emit(LoopEvent::IterationStarted { iteration });
            self.emit(LoopEvent::Thinking);

            let request = CompletionRequest {
                system_prompt: system_prompt.clone(),
                messages: self.memory.messages().to_vec(),
                max_tokens: self.config.max_tokens,
            };

            let response = match self.llm.complete(request).await {
                Ok(response) => response,
                Err(e) => {
                    debug!(exec_id = %self.exec_id, error = %e, "run: completion failed");
                    self.status = LoopStatus::Failed { reason: e.to_string() };
                    return Err(e).wrap_err(format!("Completion failed on iteration {}", iteration));
                }
            };

            debug!(
                exec_id = %self.exec_id,
                %iteration,
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                "run: got response"
            );
            self.usage.accumulate(&response.usage);

            if response.stop_reason == StopReason::MaxTokens {
                warn!(exec_id = %self.exec_id, %iteration, "Reply truncated at max tokens");
            }
            let reply = response.into_text();
            self.emit(LoopEvent::Response {
                iteration,
                text: reply.clone(),
            });

            let action = parse_action(&reply);
            debug!(exec_id = %self.exec_id, tool_name = %action.tool_name, "run: decoded action");
            let result = self.tool_executor.execute(&action, &ctx).await;

            if let Some(message) = result.termination() {
                debug!(exec_id = %self.exec_id, %iteration, "run: terminated");
                info!(exec_id = %self.exec_id, "Agent terminated after {} iterations", iteration);
                self.status = LoopStatus::Complete;
                self.emit(LoopEvent::Terminated {
                    message: message.to_string(),
                });
                return Ok(LoopOutcome::Terminated {
                    message: message.to_string(),
                    iterations: iteration,
                });
            }

            let observation = result.to_observation().wrap_err("Failed to serialize tool result")?;
            self.emit(LoopEvent::ActionResult {
                iteration,
                action,
                result,
            });
            self.memory.record_exchange(reply, observation);
        }

        debug!(exec_id = %self.exec_id, "run: max iterations reached");
        info!(exec_id = %self.exec_id, "Agent stopped at iteration cap ({})", self.iteration);
        self.status = LoopStatus::Complete;
        self.emit(LoopEvent::MaxIterationsReached);
        Ok(LoopOutcome::MaxIterations {
            iterations: self.iteration,
        })
    }
}
