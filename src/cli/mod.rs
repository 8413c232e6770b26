//! CLI module for memindex
//!
//! Provides command-line interface for:
//! - query: Load JSON records and print those matching `--where` clauses
//! - count: Same as query, prints only the number of matches
//! - tree: Load a multi-level map and run a wildcard pattern
//! - toposort: Topologically sort a JSON edge list

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, RecordArgs};
pub use commands::{count, parse_where, query, run, run_command, toposort, tree};
pub use errors::{CliError, CliResult};
pub use io::{read_json_file, write_error, write_response};
