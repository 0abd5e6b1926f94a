//! # CLI Behavior
//!
//! This is **one possible UI client** for docfolio, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the crate-level documentation in `docfolio`.
//!
//! ## Sessions
//!
//! Document and category commands need a logged-in session (`docfolio login`).
//! `login`, `logout`, `whoami`, `config` and `help` work without one.
//!
//! ## Naked Execution (`docfolio`)
//!
//! Running `docfolio` with no arguments defaults to `docfolio list`.
//!
//! ## Picking Files
//!
//! `docfolio add <path>` plays the role of a file picker: the path (or a
//! `content://` handle) is turned into a `PickedFile` with a name, size and
//! media type guessed from the extension. `--mime` overrides the guess.
//!
//! ## Data Root
//!
//! `DOCFOLIO_HOME` if set, otherwise the platform data directory.
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers that call the API and print results
//! - `picker`: Path → `PickedFile`
//! - `print`: Output formatting (tables, colors, messages)
//! - `setup`: Argument parsing via clap, grouped help text

mod commands;
mod picker;
mod print;
pub mod setup;

pub use commands::run;
