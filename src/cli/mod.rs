//! CLI module for pipestore - command-line interface and subcommands.
//!
//! One subcommand per store operation, all against a single record file.

pub mod commands;

pub use commands::Cli;
