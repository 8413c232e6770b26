//! CLI argument definitions using clap
//!
//! Commands:
//! - memindex query --config <path> --data <path> [--where field=value]...
//! - memindex count --config <path> --data <path> [--where field=value]...
//! - memindex tree --data <path> --pattern a/*/c
//! - memindex toposort --edges <path>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// memindex - In-memory inverted indexes, wildcard tries and graph tools
#[derive(Parser, Debug)]
#[command(name = "memindex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Inputs shared by `query` and `count`
#[derive(Args, Debug, Clone)]
pub struct RecordArgs {
    /// Path to index configuration file
    #[arg(long, default_value = "./memindex.json")]
    pub config: PathBuf,

    /// Path to a JSON array of records
    #[arg(long)]
    pub data: PathBuf,

    /// Equality clause `field=value`; value is parsed as JSON when possible
    #[arg(long = "where", value_name = "FIELD=VALUE")]
    pub clauses: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print records matching every clause
    Query(RecordArgs),

    /// Print the number of records matching every clause
    Count(RecordArgs),

    /// Query a multi-level map with a wildcard pattern
    Tree {
        /// Path to a JSON array of `{"path": [..], "value": ..}` entries
        #[arg(long)]
        data: PathBuf,

        /// Pattern of labels separated by `/`; `*` matches any label
        #[arg(long, default_value = "")]
        pattern: String,
    },

    /// Topologically sort a JSON array of `[from, to, distance]` edges
    Toposort {
        /// Path to the edge list
        #[arg(long)]
        edges: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_with_clauses() {
        let cli = Cli::try_parse_from([
            "memindex",
            "query",
            "--data",
            "records.json",
            "--where",
            "category=books",
            "--where",
            "price=15",
        ])
        .unwrap();

        match cli.command {
            Command::Query(args) => {
                assert_eq!(args.config, PathBuf::from("./memindex.json"));
                assert_eq!(args.clauses, vec!["category=books", "price=15"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_data_is_required() {
        assert!(Cli::try_parse_from(["memindex", "count"]).is_err());
    }
}
