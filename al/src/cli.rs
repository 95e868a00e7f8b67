//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// agentloop - prompt-driven LLM agent
#[derive(Debug, Parser)]
#[command(
    name = "al",
    about = "Prompt-driven LLM agent loop, function developer and chat",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute; defaults to an interactive `run`
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the agent on a task until it terminates
    Run {
        /// Task for the agent (prompted for when omitted)
        task: Option<String>,

        /// Maximum iterations
        #[arg(short, long)]
        max_iterations: Option<u32>,

        /// Directory the file tools operate in
        #[arg(short = 'd', long = "dir")]
        working_dir: Option<PathBuf>,
    },

    /// Generate a documented, tested function and write it to a file
    Develop {
        /// What the function should do (prompted for when omitted)
        description: Option<String>,

        /// Directory to write the generated file to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Language of the function (also the code fence tag)
        #[arg(long)]
        language: Option<String>,

        /// Extension of the generated file, without the dot
        #[arg(long)]
        extension: Option<String>,

        /// Test framework for the generated tests
        #[arg(long)]
        test_framework: Option<String>,
    },

    /// Chat with the model; starts a REPL when no messages are given
    Chat {
        /// System prompt for the session
        #[arg(short, long)]
        system: Option<String>,

        /// Messages to send in order
        messages: Vec<String>,
    },

    /// List the tools offered to the agent
    Tools,
}

/// Path of the log file
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("agentloop")
        .join("logs")
        .join("agentloop.log")
}

/// Generate the after_help text with the log location
pub fn generate_after_help() -> String {
    debug!("generate_after_help: called");
    format!("Logs are written to: {}", get_log_path().display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["al"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from(["al", "-l", "debug", "run", "list my files", "-m", "3", "-d", "/tmp"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Some(Command::Run {
                task,
                max_iterations,
                working_dir,
            }) => {
                assert_eq!(task.as_deref(), Some("list my files"));
                assert_eq!(max_iterations, Some(3));
                assert_eq!(working_dir, Some(PathBuf::from("/tmp")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_develop() {
        let cli = Cli::try_parse_from([
            "al",
            "develop",
            "reverses a string",
            "--language",
            "rust",
            "--extension",
            "rs",
            "--test-framework",
            "cargo test",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Develop {
                description,
                language,
                extension,
                test_framework,
                output_dir,
            }) => {
                assert_eq!(description.as_deref(), Some("reverses a string"));
                assert_eq!(language.as_deref(), Some("rust"));
                assert_eq!(extension.as_deref(), Some("rs"));
                assert_eq!(test_framework.as_deref(), Some("cargo test"));
                assert!(output_dir.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_chat_messages() {
        let cli = Cli::try_parse_from(["al", "chat", "-s", "Be terse", "first", "second"]).unwrap();
        match cli.command {
            Some(Command::Chat { system, messages }) => {
                assert_eq!(system.as_deref(), Some("Be terse"));
                assert_eq!(messages, vec!["first", "second"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["al", "tools", "--config", "custom.yml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.yml")));
    }
}
