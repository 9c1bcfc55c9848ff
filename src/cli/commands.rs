//! CLI command definitions using clap.
//!
//! Each subcommand maps onto one store operation:
//! - append / append-fields: add a record
//! - read / last / find: query records
//! - update / delete / clear: rewrite the file
//! - count: number of records

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pipestore - a flat-file record store over pipe-delimited text
#[derive(Parser, Debug)]
#[command(name = "pipestore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Record file to operate on (overrides store.path from config)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Append a raw line
    Append {
        /// Line to append, fields separated by '|'
        line: String,
    },

    /// Append a record built from separate fields
    AppendFields {
        /// Field values, joined with '|'
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Print every record
    Read,

    /// Print the last line
    Last,

    /// Print the first line with a field equal to VALUE
    Find {
        /// Exact field value to look for
        value: String,
    },

    /// Replace OLD with NEW in every line containing it
    Update {
        /// Substring to replace
        old: String,

        /// Replacement text
        new: String,
    },

    /// Remove every line containing VALUE
    Delete {
        /// Substring selecting lines to remove
        value: String,
    },

    /// Print the number of records
    Count,

    /// Remove all records
    Clear,
}
