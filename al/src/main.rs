//! agentloop - prompt-driven LLM agent
//!
//! CLI entry point for the agent loop, the function developer and chat.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{CommandFactory, FromArgMatches};
use colored::Colorize;
use eyre::{Context, Result};
use rustyline::DefaultEditor;
use tokio::sync::mpsc;
use tracing::{debug, info};

use agentloop::cli::{Cli, Command, generate_after_help};
use agentloop::config::Config;
use agentloop::develop::{DevelopEvent, FunctionDeveloper};
use agentloop::llm::{LlmClient, LlmError, create_client};
use agentloop::r#loop::{LoopConfig, LoopEngine, LoopEvent, LoopOutcome};
use agentloop::repl::{self, ChatSession};
use agentloop::tools::ToolExecutor;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("agentloop")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("agentloop.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Cli::command().after_help(generate_after_help());
    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    // Log level is needed before the full config load
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(
        "agentloop loaded config: provider={} model={}",
        config.llm.provider, config.llm.model
    );

    debug!(command = ?cli.command, "main: dispatching command");
    let result = match cli.command {
        Some(Command::Run {
            task,
            max_iterations,
            working_dir,
        }) => {
            if let Some(max_iterations) = max_iterations {
                config.agent.max_iterations = max_iterations;
            }
            if let Some(working_dir) = working_dir {
                config.agent.working_dir = working_dir;
            }
            cmd_run(&config, task).await
        }
        Some(Command::Develop {
            description,
            output_dir,
            language,
            extension,
            test_framework,
        }) => {
            if let Some(output_dir) = output_dir {
                config.develop.output_dir = output_dir;
            }
            if let Some(language) = language {
                config.develop.language = language;
            }
            if let Some(extension) = extension {
                config.develop.extension = extension;
            }
            if let Some(test_framework) = test_framework {
                config.develop.test_framework = test_framework;
            }
            cmd_develop(&config, description).await
        }
        Some(Command::Chat { system, messages }) => {
            if let Some(system) = system {
                config.chat.system_prompt = system;
            }
            cmd_chat(&config, messages).await
        }
        Some(Command::Tools) => cmd_tools(),
        None => {
            debug!("main: no subcommand, running interactively");
            cmd_run(&config, None).await
        }
    };

    if let Err(e) = &result {
        print_llm_hint(e, &config);
    }
    result
}

/// Extra guidance when the provider rejected the request
fn print_llm_hint(err: &eyre::Report, config: &Config) {
    if let Some(llm_err) = err.downcast_ref::<LlmError>()
        && llm_err.is_client_error()
    {
        eprintln!(
            "{} the {} provider rejected the request; check the model name '{}' and credentials",
            "hint:".yellow(),
            config.llm.provider,
            config.llm.model
        );
    }
}

fn make_client(config: &Config) -> Result<Arc<dyn LlmClient>> {
    create_client(&config.llm).context("Failed to create LLM client")
}

/// Read one line from the terminal
fn prompt_line(prompt: &str) -> Result<String> {
    let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;
    let line = rl.readline(prompt).map_err(|e| eyre::eyre!("Failed to read input: {}", e))?;
    Ok(line.trim().to_string())
}

async fn cmd_run(config: &Config, task: Option<String>) -> Result<()> {
    debug!(?task, "cmd_run: called");
    let task = match task {
        Some(task) => task,
        None => prompt_line("What would you like me to do? ")?,
    };

    let llm = make_client(config)?;
    let exec_id = uuid::Uuid::now_v7().to_string();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut engine = LoopEngine::new(exec_id, LoopConfig::from_config(config), llm).with_events(tx);

    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            print_loop_event(event);
        }
    });

    let outcome = engine.run(&task).await;
    drop(engine);
    if let Err(e) = printer.await {
        debug!(%e, "cmd_run: printer task failed");
    }

    match outcome? {
        LoopOutcome::Terminated { iterations, .. } => info!("Run terminated after {} iterations", iterations),
        LoopOutcome::MaxIterations { iterations } => info!("Run hit the cap after {} iterations", iterations),
    }
    Ok(())
}

fn print_loop_event(event: LoopEvent) {
    match event {
        LoopEvent::IterationStarted { iteration } => {
            println!();
            println!("{}", format!("Iteration {}", iteration).bright_cyan().bold());
        }
        LoopEvent::Thinking => println!("{}", "Agent thinking...".dimmed()),
        LoopEvent::Response { text, .. } => {
            println!("{}", "Agent response:".bright_blue());
            println!("{}", text);
            println!();
        }
        LoopEvent::ActionResult { result, .. } => {
            let pretty = serde_json::to_string_pretty(&result).unwrap_or_else(|e| e.to_string());
            println!("{} {}", "Action result:".bright_yellow(), pretty);
        }
        LoopEvent::Terminated { message } => {
            println!();
            println!("{} {}", "Termination:".bright_green().bold(), message);
        }
        LoopEvent::MaxIterationsReached => {
            println!();
            println!("{}", "Max iterations reached. Exiting.".yellow());
        }
    }
}

async fn cmd_develop(config: &Config, description: Option<String>) -> Result<()> {
    debug!(?description, "cmd_develop: called");
    let description = match description {
        Some(description) => description,
        None => {
            println!();
            println!("What kind of function would you like to create?");
            println!("Example: 'A function that calculates the factorial of a number'");
            prompt_line("Your description: ")?
        }
    };

    let llm = make_client(config)?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut developer = FunctionDeveloper::new(config.develop.clone(), llm)
        .with_max_tokens(config.llm.max_tokens)
        .with_events(tx);

    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                DevelopEvent::StepCompleted { step, code } => {
                    println!();
                    println!("{}", format!("=== {} ===", step.title()).bright_cyan().bold());
                    println!("{}", code);
                }
                DevelopEvent::Written { path } => {
                    println!();
                    println!("{} {}", "Code and tests written to:".bright_green(), path.display());
                }
            }
        }
    });

    let outcome = developer.develop(&description).await;
    drop(developer);
    if let Err(e) = printer.await {
        debug!(%e, "cmd_develop: printer task failed");
    }

    let outcome = outcome?;
    info!("Develop run wrote {}", outcome.path.display());
    Ok(())
}

async fn cmd_chat(config: &Config, messages: Vec<String>) -> Result<()> {
    debug!(count = messages.len(), "cmd_chat: called");
    let llm = make_client(config)?;
    let mut chat = ChatSession::new(llm, config.chat.system_prompt.clone()).with_max_tokens(config.llm.max_tokens);

    if messages.is_empty() {
        repl::run_interactive(chat).await
    } else {
        repl::run_script(&mut chat, &messages).await
    }
}

fn cmd_tools() -> Result<()> {
    debug!("cmd_tools: called");
    println!("{}", "Available tools:".bright_cyan());
    for def in ToolExecutor::standard().definitions() {
        println!("  {:12} {}", def.name.yellow(), def.description);
    }
    Ok(())
}
