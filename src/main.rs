//! memindex CLI entry point
//!
//! All logic is delegated to the CLI module; this file only reports the
//! error and exits non-zero on failure.

use memindex::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}: {}", e.code(), e);
        std::process::exit(1);
    }
}
