use crate::model::{Document, PickedFile, SourceLocation};
use crate::store::categories::CategoryRegistry;
use crate::store::document_store::DocumentStore;
use crate::store::fs_backend::FsBackend;
use crate::store::mem_backend::MemBackend;
use crate::store::DataStore;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub store: DocumentStore<FsBackend>,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let store = DocumentStore::with_backend(FsBackend::new(root.join("data")));
        Self {
            _temp_dir: temp_dir,
            store,
            root,
        }
    }

    /// Write a file outside the data root, the way a picker would hand one over.
    pub fn source_file(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let dir = self.root.join("picked");
        std::fs::create_dir_all(&dir).expect("failed to create picker dir");
        let path = dir.join(name);
        std::fs::write(&path, bytes).expect("failed to write source file");
        path
    }
}

/// Document store and category registry sharing one in-memory backend.
pub struct MemEnv {
    pub backend: MemBackend,
    pub store: DocumentStore<MemBackend>,
    pub categories: CategoryRegistry<MemBackend>,
}

impl Default for MemEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl MemEnv {
    pub fn new() -> Self {
        let backend = MemBackend::new();
        Self {
            store: DocumentStore::with_backend(backend.clone()),
            categories: CategoryRegistry::new(backend.clone()),
            backend,
        }
    }

    /// Place bytes where a picker would find them.
    pub fn pick(&self, name: &str, mime_type: &str, bytes: &[u8]) -> PickedFile {
        let uri = format!("/picker/{}", name);
        self.backend.insert_file(&uri, bytes);
        PickedFile::new(uri)
            .with_name(name)
            .with_size(bytes.len() as u64)
            .with_mime_type(mime_type)
    }

    /// Import a small PDF and index it directly through the store.
    pub fn add_document(&mut self, name: &str, category: &str) -> Document {
        let picked = self.pick("fixture.pdf", "application/pdf", b"%PDF-1.4\n%%EOF");
        let path = self
            .store
            .import_file(&SourceLocation::parse(&picked.uri), "fixture.pdf")
            .expect("import failed");
        let doc = Document::new(name, picked.document_type(), category, path.to_string_lossy())
            .with_size(picked.size)
            .with_mime_type(picked.mime_type.clone());
        self.store.save_document(&doc).expect("save failed");
        doc
    }
}
