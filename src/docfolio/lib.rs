//! # Docfolio Architecture
//!
//! Docfolio is a **UI-agnostic document organizer library**. Users pick PDFs and
//! images, docfolio copies the bytes into a private storage folder, files them
//! under a name and a category, and keeps a small JSON index of what it holds.
//! The command-line client in `cli/` is one possible UI over it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (display indexes → selectors)          │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Input validation and caller-side rules                   │
//! │  - Operates on Rust types, returns Rust types               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DocumentStore: import, index, reconcile                  │
//! │  - CategoryRegistry, SessionStore over the same backend     │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Self-Healing Index
//!
//! The index and the stored files can drift apart. Listing is where that gets
//! repaired: records whose file is gone are dropped and the smaller index is
//! written back. See [`store`] for the full rules.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, commands, storage), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr (diagnostics go through `tracing`)
//! - **Never** calls `std::process::exit`
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): unit tests of the caller-side rules over
//!    [`store::mem_backend::MemBackend`].
//! 2. **Storage** (`store/*.rs`): reconciliation, import and failure paths, with
//!    fault injection from the in-memory backend.
//! 3. **API** (`api.rs`): dispatch tests.
//! 4. **Integration** (`tests/`): real files under a temp dir and the binary
//!    end to end.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Document`, `DocumentType`, `PickedFile`)
//! - [`index`]: Display positions and selectors
//! - [`viewer`]: Type-specific previews of stored bytes
//! - [`session`]: Simulated login state
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod session;
pub mod store;
pub mod viewer;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
