//! CLI module
//!
//! # Commands
//!
//! - `flatten` - Flatten records from a JSON or JSON Lines file
//! - `query` - Run an endpoint operation against recorded responses
//! - `operations` - List operation names

mod commands;
mod runner;

pub use commands::{Cli, Commands, Operation, OutputFormat, Selectors};
pub use runner::{run_operation, Runner};

#[cfg(test)]
mod tests;
