//! Interactive research REPL

pub mod repl;

pub use repl::ResearchRepl;
