//! # Storage Layer
//!
//! This module defines the storage abstraction for docfolio. The [`DataStore`] trait
//! allows the command layer to work against any backend.
//!
//! ## Two Kinds of State
//!
//! Docfolio keeps two things in step:
//! 1. **Bytes**: imported files inside a private `documents/` folder.
//! 2. **Index**: a JSON list of [`Document`] records under the `DOCUMENTS` key.
//!
//! The index is the queryable view; the files are what it points at. The two can
//! drift (a file removed by hand, a crash between copy and save), so reads repair
//! the index lazily.
//!
//! ## Reconciliation Logic
//!
//! Every `list_documents` call walks the index:
//!
//! 1. **Orphaned record**: `uri` no longer resolves to a file → dropped, and the
//!    surviving list is written back so the purge is durable.
//! 2. **Unknown**: the existence check itself fails → record kept, warning logged.
//! 3. **Orphaned file**: a file with no record → tolerated. Reported by `doctor`,
//!    never deleted.
//!
//! ## Failure Policy
//!
//! - File deletions and existence checks are best effort; they never block an
//!   index mutation.
//! - Key-value writes are fatal to the calling operation and surface as
//!   [`DocfolioError::Persistence`](crate::error::DocfolioError::Persistence).
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: real files under a data root.
//! - [`mem_backend::MemBackend`]: in-memory, with fault injection for tests.
//!
//! [`document_store::DocumentStore`] implements [`DataStore`] over either backend.
//! [`categories::CategoryRegistry`] only needs the key-value half.
//!
//! ## Storage Layout
//!
//! ```text
//! <root>/
//! ├── documents/
//! │   └── {prefix}_{sanitized-name}   # imported files
//! └── storage/
//!     ├── DOCUMENTS                   # index (JSON array)
//!     ├── CATEGORIES                  # category names (JSON array)
//!     └── auth-storage                # session
//! ```

use crate::error::Result;
use crate::model::{Document, DocumentUpdate, SourceLocation};
use std::path::{Path, PathBuf};

pub mod backend;
pub mod categories;
pub mod document_store;
pub mod fs_backend;
pub mod mem_backend;

/// Report from the `doctor` operation.
#[derive(Debug, Default, Clone)]
pub struct DoctorReport {
    pub storage_dir: PathBuf,
    pub storage_exists: bool,
    pub document_count: usize,
    pub purged_records: usize,
    pub stray_files: Vec<PathBuf>,
    /// Free bytes on the storage volume, when the backend can tell.
    pub free_space: Option<u64>,
    pub platform: &'static str,
}

/// Abstract interface for document storage.
pub trait DataStore {
    /// Create the private storage folder if needed and return its path.
    fn ensure_storage_ready(&self) -> Result<PathBuf>;

    /// Copy picked bytes into private storage. Never touches the index.
    fn import_file(&self, source: &SourceLocation, suggested_name: &str) -> Result<PathBuf>;

    /// Best-effort removal of an imported file that never made it into the index.
    fn discard_import(&self, path: &Path);

    /// Append a record to the index.
    fn save_document(&mut self, document: &Document) -> Result<()>;

    /// Reconciled list, in insertion order.
    fn list_documents(&self) -> Result<Vec<Document>>;

    fn get_document(&self, id: &str) -> Result<Document>;

    /// Merge a partial update into the record and persist. Returns the updated record.
    fn update_document(&mut self, id: &str, update: &DocumentUpdate) -> Result<Document>;

    /// Remove the record (and, best effort, its file). Returns the removed record.
    fn delete_document(&mut self, id: &str) -> Result<Document>;

    /// Read the stored bytes behind a record.
    fn read_content(&self, document: &Document) -> Result<Vec<u8>>;

    /// Reconcile and report on storage health.
    fn doctor(&self) -> Result<DoctorReport>;
}
