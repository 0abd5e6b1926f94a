//! # Docfolio CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! Logging goes to stderr through `tracing`. The filter comes from
//! `DOCFOLIO_LOG` (e.g. `DOCFOLIO_LOG=docfolio=debug`), defaulting to `warn`;
//! `--verbose` raises the default to `debug`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
