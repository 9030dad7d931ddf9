//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for research results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Answer plus sources and per-agent statuses
    Full,
    /// Only the synthesized answer
    Answer,
    /// JSON output
    Json,
}

/// CLI arguments for copilot-research
#[derive(Parser, Debug)]
#[command(name = "copilot-research")]
#[command(author, version, about = "Multi-agent research assistant with cited answers")]
#[command(long_about = r#"
Copilot Research routes a question to specialized retrieval agents
(local documents, academic papers, web, code hosts, video), runs them in
parallel, and synthesizes one answer with merged citations.

The pipeline may ask for clarification first when a question has no
resolvable subject; answer the follow-up to continue. With --plan the
aggregated result is turned into a phased study plan and published as a
markdown artifact.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./research.toml     Project-level config
3. ~/.config/copilot-research/config.toml   Global config

Example:
  copilot-research "Recent work on speculative decoding"
  copilot-research --plan "How do I learn lock-free programming?"
  copilot-research --chat
"#)]
pub struct Cli {
    /// The research question (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Derive and publish a study plan from the result
    #[arg(short, long)]
    pub plan: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_question_and_flags() {
        let cli = Cli::parse_from(["copilot-research", "--plan", "-vv", "what is rust?"]);
        assert_eq!(cli.question.as_deref(), Some("what is rust?"));
        assert!(cli.plan);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.chat);
    }

    #[test]
    fn test_chat_mode_needs_no_question() {
        let cli = Cli::parse_from(["copilot-research", "--chat"]);
        assert!(cli.chat);
        assert!(cli.question.is_none());
    }
}
