//! Presentation layer for copilot-research
//!
//! This crate contains CLI definitions, output formatters, progress
//! reporters, and the interactive research REPL.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::ResearchRepl;
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
