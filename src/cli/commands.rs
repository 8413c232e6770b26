//! CLI command implementations
//!
//! Each command loads its inputs from JSON files, runs one operation and
//! prints a single `{"status": ..}` object on stdout.

use std::path::Path;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::IndexConfig;
use crate::graph::{nodes_from_edges, topo_sort, Edge};
use crate::index::{IndexKey, IndexQuery, InvertedIndexMap};
use crate::tree::{parse_pattern, MultiLevelMap};

use super::args::{Cli, Command, RecordArgs};
use super::errors::{CliError, CliResult};
use super::io::{read_json_file, write_error, write_response};

/// One entry of a `tree --data` file
#[derive(Debug, Deserialize)]
struct TreeEntry {
    path: Vec<String>,
    value: Value,
}

/// Main CLI entry point
///
/// Installs logging, parses arguments and dispatches to the appropriate
/// command. This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    init_tracing();
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("logging disabled: {}", e);
    }
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Query(args) => query(&args),
        Command::Count(args) => count(&args),
        Command::Tree { data, pattern } => tree(&data, &pattern),
        Command::Toposort { edges } => toposort(&edges),
    }
}

/// Print every record matching the `--where` clauses, in load order
pub fn query(args: &RecordArgs) -> CliResult<()> {
    let (map, query) = load_records(args)?;
    let matches: Vec<Value> = map.query(&query, None).into_iter().cloned().collect();
    write_response(Value::Array(matches))
}

/// Print the number of records matching the `--where` clauses
pub fn count(args: &RecordArgs) -> CliResult<()> {
    let (map, query) = load_records(args)?;
    write_response(json!({ "count": map.count(&query, None) }))
}

/// Print every value under the nodes matched by `pattern`
pub fn tree(data_path: &Path, pattern: &str) -> CliResult<()> {
    let entries: Vec<TreeEntry> = read_json_file(data_path)?;
    let mut map = MultiLevelMap::new();
    for entry in entries {
        map.set(entry.path.as_slice(), entry.value);
    }
    debug!(values = map.len(), "multi-level map loaded");

    let segments = parse_pattern(pattern, '/');
    let values: Vec<Value> = map.query(&segments).into_iter().cloned().collect();
    write_response(Value::Array(values))
}

/// Print a topological order of the nodes of an edge list.
///
/// Nodes are strings; each edge is a `[from, to, distance]` triple.
///
/// Graph errors are reported both as a structured response and as the
/// command's error.
pub fn toposort(edges_path: &Path) -> CliResult<()> {
    let edges: Vec<Edge<String>> = read_json_file(edges_path)?;
    let nodes = nodes_from_edges(&edges);

    match topo_sort(&nodes, &edges) {
        Ok(order) => write_response(json!(order)),
        Err(e) => {
            write_error(e.code(), &e.to_string())?;
            Err(e.into())
        }
    }
}

/// Load config and records, and build the query from `--where` clauses.
fn load_records(args: &RecordArgs) -> CliResult<(InvertedIndexMap<Value>, IndexQuery)> {
    let config = IndexConfig::load(&args.config)?;
    let records: Vec<Value> = read_json_file(&args.data)?;

    let mut map = InvertedIndexMap::from_config(&config);
    for record in records {
        map.try_add_json(record, &config.primary_key)?;
    }
    debug!(
        records = map.len(),
        fields = config.indexed_fields.len(),
        "records loaded"
    );

    let mut query = IndexQuery::new();
    for clause in &args.clauses {
        let (field, value) = parse_where(clause)?;
        query.set(field, Some(value));
    }
    Ok((map, query))
}

/// Split a `field=value` clause.
///
/// The value is read as JSON when it parses (`30`, `true`, `null`,
/// `"quoted"`) and as a plain string otherwise.
pub fn parse_where(clause: &str) -> CliResult<(String, IndexKey)> {
    let (field, raw) = clause.split_once('=').ok_or_else(|| {
        CliError::invalid_input(format!("expected field=value, got '{}'", clause))
    })?;
    if field.is_empty() {
        return Err(CliError::invalid_input(format!(
            "empty field name in '{}'",
            clause
        )));
    }

    let value = match serde_json::from_str::<Value>(raw) {
        Ok(parsed) => IndexKey::from_json(&parsed),
        Err(_) => IndexKey::from(raw),
    };
    Ok((field.to_string(), value))
}
