//! FunctionDeveloper - implement, document, then test a function

use std::path::PathBuf;
use std::sync::Arc;

use eyre::{Result, WrapErr, bail};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use crate::config::DevelopConfig;
use crate::extract::{FENCE, extract_code_block};
use crate::llm::{CompletionRequest, LlmClient, Message, TokenUsage};
use crate::prompts::{DevelopPromptContext, PromptLoader};

use super::build_filename;

/// The three prompts of a develop run, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevelopStep {
    Implement,
    Document,
    Test,
}

impl DevelopStep {
    pub const ALL: [DevelopStep; 3] = [Self::Implement, Self::Document, Self::Test];

    /// Heading shown when the step completes
    pub fn title(&self) -> &'static str {
        match self {
            Self::Implement => "Initial Function",
            Self::Document => "Documented Function",
            Self::Test => "Test Cases",
        }
    }

    pub fn template_name(&self) -> &'static str {
        match self {
            Self::Implement => "develop-implement",
            Self::Document => "develop-document",
            Self::Test => "develop-test",
        }
    }

    /// Whether the extracted code is fed back as the assistant turn
    fn feeds_back(&self) -> bool {
        !matches!(self, Self::Test)
    }
}

impl std::fmt::Display for DevelopStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Progress notifications for the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DevelopEvent {
    StepCompleted { step: DevelopStep, code: String },
    Written { path: PathBuf },
}

/// Artifacts of a develop run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevelopOutcome {
    pub implementation: String,
    pub documented: String,
    pub tests: String,
    pub path: PathBuf,
}

/// Chains three prompts over one conversation and writes the result to disk
pub struct FunctionDeveloper {
    config: DevelopConfig,
    llm: Arc<dyn LlmClient>,
    prompts: PromptLoader,
    max_tokens: Option<u32>,
    messages: Vec<Message>,
    usage: TokenUsage,
    events: Option<UnboundedSender<DevelopEvent>>,
}

impl FunctionDeveloper {
    pub fn new(config: DevelopConfig, llm: Arc<dyn LlmClient>) -> Self {
        debug!(language = %config.language, "FunctionDeveloper::new: called");
        // Overrides live beside the invocation, not inside the output directory
        let prompts = PromptLoader::new(".");
        Self {
            config,
            llm,
            prompts,
            max_tokens: None,
            messages: Vec::new(),
            usage: TokenUsage::default(),
            events: None,
        }
    }

    pub fn with_prompts(mut self, prompts: PromptLoader) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Send progress events to `tx`
    pub fn with_events(mut self, tx: UnboundedSender<DevelopEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    /// Conversation so far, without the system prompt
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Tokens reported by the provider over the last run
    pub fn usage(&self) -> &TokenUsage {
        &self.usage
    }

    fn emit(&self, event: DevelopEvent) {
        if let Some(tx) = &self.events
            && tx.send(event).is_err()
        {
            debug!("FunctionDeveloper::emit: event receiver dropped");
        }
    }

    /// Run the three steps for `description` and write the output file
    pub async fn develop(&mut self, description: &str) -> Result<DevelopOutcome> {
        debug!(%description, "FunctionDeveloper::develop: called");
        let description = description.trim();
        if description.is_empty() {
            bail!("Function description must not be empty");
        }
        info!("Developing {} function: {}", self.config.language, description);

        let context = DevelopPromptContext::new(&self.config.language, &self.config.test_framework, description);
        let system_prompt = self.prompts.render("develop-system", &context)?;
        self.messages.clear();
        self.usage = TokenUsage::default();

        let mut artifacts = Vec::with_capacity(DevelopStep::ALL.len());
        for step in DevelopStep::ALL {
            let code = self.run_step(step, &system_prompt, &context).await?;
            artifacts.push(code);
        }

        let [implementation, documented, tests]: [String; 3] = artifacts
            .try_into()
            .map_err(|_| eyre::eyre!("Expected one artifact per step"))?;

        let path = self.write_output(description, &documented, &tests).await?;
        Ok(DevelopOutcome {
            implementation,
            documented,
            tests,
            path,
        })
    }

    async fn run_step(&mut self, step: DevelopStep, system_prompt: &str, context: &DevelopPromptContext) -> Result<String> {
        debug!(%step, "FunctionDeveloper::run_step: called");
        let prompt = self.prompts.render(step.template_name(), context)?;
        self.messages.push(Message::user(prompt));

        let request = CompletionRequest {
            system_prompt: system_prompt.to_string(),
            messages: self.messages.clone(),
            max_tokens: self.max_tokens,
        };
        let response = self
            .llm
            .complete(request)
            .await
            .wrap_err_with(|| format!("Completion failed during step '{}'", step))?;
        debug!(
            %step,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "FunctionDeveloper::run_step: got response"
        );
        self.usage.accumulate(&response.usage);
        let reply = response.into_text();

        let code = extract_code_block(&reply, &self.config.language).to_string();
        debug!(%step, code_len = code.len(), "FunctionDeveloper::run_step: extracted code");

        if step.feeds_back() {
            self.messages.push(Message::assistant(format!(
                "{FENCE}{}\n{}\n{FENCE}",
                self.config.language, code
            )));
        }

        self.emit(DevelopEvent::StepCompleted {
            step,
            code: code.clone(),
        });
        Ok(code)
    }

    async fn write_output(&self, description: &str, documented: &str, tests: &str) -> Result<PathBuf> {
        let filename = build_filename(description, &self.config.extension);
        let path = self.config.output_dir.join(filename);
        debug!(?path, "FunctionDeveloper::write_output: called");

        tokio::fs::create_dir_all(&self.config.output_dir)
            .await
            .wrap_err_with(|| format!("Failed to create {}", self.config.output_dir.display()))?;
        tokio::fs::write(&path, format!("{}\n\n{}", documented, tests))
            .await
            .wrap_err_with(|| format!("Failed to write {}", path.display()))?;

        info!("Code and tests written to {}", path.display());
        self.emit(DevelopEvent::Written { path: path.clone() });
        Ok(path)
    }
}
