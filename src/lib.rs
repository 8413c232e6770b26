//! memindex - In-memory inverted indexes, wildcard tries and graph utilities
//!
//! - `index`: multi-field secondary indexes with sorted posting lists
//! - `tree`: hierarchical map queried by label patterns with wildcards
//! - `graph`: cycle detection, topological sort, shortest paths, closure
//! - `keyed`: map whose identity is a caller-supplied key function
//!
//! All structures are synchronous and single-threaded.

pub mod cli;
pub mod config;
pub mod graph;
pub mod index;
pub mod keyed;
pub mod tree;
