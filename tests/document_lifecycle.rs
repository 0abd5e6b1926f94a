use docfolio::api::{DocfolioApi, ListFilter};
use docfolio::config::DocfolioConfig;
use docfolio::error::DocfolioError;
use docfolio::model::{Document, DocumentType, DocumentUpdate, PickedFile, SourceLocation};
use docfolio::store::backend::KeyValueStore;
use docfolio::store::categories::CategoryRegistry;
use docfolio::store::document_store::{DocumentStore, DOCUMENTS_KEY};
use docfolio::store::fs_backend::FsBackend;
use docfolio::store::DataStore;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
    backend: FsBackend,
    store: DocumentStore<FsBackend>,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path().join("data"));
        let store = DocumentStore::with_backend(backend.clone());
        Self {
            dir,
            backend,
            store,
        }
    }

    fn source(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let picked_dir = self.dir.path().join("picked");
        std::fs::create_dir_all(&picked_dir).unwrap();
        let path = picked_dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    fn import_and_save(&mut self, file: &str, name: &str, category: &str) -> Document {
        let src = self.source(file, b"%PDF-1.4 fixture");
        let path = self
            .store
            .import_file(&SourceLocation::Path(src), file)
            .unwrap();
        let doc = Document::new(name, DocumentType::Pdf, category, path.to_string_lossy());
        self.store.save_document(&doc).unwrap();
        doc
    }

    fn raw_index(&self) -> Vec<Document> {
        let json = self.backend.get_item(DOCUMENTS_KEY).unwrap().unwrap();
        serde_json::from_str(&json).unwrap()
    }
}

#[test]
fn q1_report_end_to_end() {
    let mut fx = Fixture::new();
    let bytes = b"%PDF-1.4\n\n";
    assert_eq!(bytes.len(), 10);
    let src = fx.source("report.pdf", bytes);

    let path = fx
        .store
        .import_file(&SourceLocation::Path(src), "report.pdf")
        .unwrap();
    let doc = Document::new(
        "Q1 Report",
        DocumentType::resolve(Some("application/pdf"), "report.pdf"),
        "Trabajo",
        path.to_string_lossy(),
    );
    fx.store.save_document(&doc).unwrap();

    let listed = fx.store.list_documents().unwrap();
    assert_eq!(listed.len(), 1);
    let record = &listed[0];
    assert_eq!(record.name, "Q1 Report");
    assert_eq!(record.doc_type, DocumentType::Pdf);
    assert_eq!(record.category, "Trabajo");
    assert!(record.path().starts_with(fx.dir.path().join("data").join("documents")));
    assert_eq!(std::fs::read(record.path()).unwrap(), bytes);

    // Persisted with the wire names other clients read
    let json = fx.backend.get_item(DOCUMENTS_KEY).unwrap().unwrap();
    assert!(json.contains(r#""type":"PDF""#));
    assert!(json.contains(r#""name":"Q1 Report""#));
}

#[test]
fn repeated_names_never_collide() {
    let mut fx = Fixture::new();
    let a = fx.import_and_save("same.pdf", "A", "Personal");
    let b = fx.import_and_save("same.pdf", "B", "Personal");

    assert_ne!(a.uri, b.uri);
    assert_eq!(fx.store.list_documents().unwrap().len(), 2);
}

#[test]
fn listing_is_idempotent() {
    let mut fx = Fixture::new();
    fx.import_and_save("a.pdf", "A", "Personal");
    fx.import_and_save("b.pdf", "B", "Salud");

    let first = fx.store.list_documents().unwrap();
    let second = fx.store.list_documents().unwrap();
    assert_eq!(first, second);
}

#[test]
fn self_healing_purge_is_durable() {
    let mut fx = Fixture::new();
    let docs: Vec<Document> = (0..5)
        .map(|i| fx.import_and_save(&format!("d{}.pdf", i), &format!("Doc {}", i), "Personal"))
        .collect();

    std::fs::remove_file(docs[1].path()).unwrap();
    std::fs::remove_file(docs[3].path()).unwrap();

    let listed = fx.store.list_documents().unwrap();
    let names: Vec<_> = listed.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Doc 0", "Doc 2", "Doc 4"]);
    assert_eq!(fx.raw_index(), listed);
}

#[test]
fn delete_removes_record_and_file() {
    let mut fx = Fixture::new();
    let doc = fx.import_and_save("a.pdf", "A", "Personal");

    fx.store.delete_document(&doc.id).unwrap();

    assert!(fx.store.list_documents().unwrap().is_empty());
    assert!(!doc.path().exists());
    assert!(matches!(
        fx.store.delete_document(&doc.id),
        Err(DocfolioError::DocumentNotFound(_))
    ));
}

#[test]
fn delete_survives_an_already_missing_file() {
    let mut fx = Fixture::new();
    let doc = fx.import_and_save("a.pdf", "A", "Personal");
    let keep = fx.import_and_save("b.pdf", "B", "Personal");
    std::fs::remove_file(doc.path()).unwrap();

    // The record was purged by reconciliation, so it is already gone
    assert!(matches!(
        fx.store.delete_document(&doc.id),
        Err(DocfolioError::DocumentNotFound(_))
    ));
    assert_eq!(fx.store.list_documents().unwrap(), vec![keep]);
}

#[test]
fn update_changes_only_the_name() {
    let mut fx = Fixture::new();
    let doc = fx.import_and_save("a.pdf", "Old", "Trabajo");

    let updated = fx
        .store
        .update_document(&doc.id, &DocumentUpdate::name("X"))
        .unwrap();

    assert_eq!(updated.name, "X");
    assert_eq!(updated.category, doc.category);
    assert_eq!(updated.uri, doc.uri);
    assert_eq!(updated.date, doc.date);
    assert_eq!(updated.doc_type, doc.doc_type);
    assert_eq!(fx.raw_index(), vec![updated]);
}

#[test]
fn missing_source_creates_nothing() {
    let fx = Fixture::new();
    let result = fx.store.import_file(
        &SourceLocation::Path(fx.dir.path().join("ghost.pdf")),
        "ghost.pdf",
    );

    assert!(matches!(result, Err(DocfolioError::SourceNotFound(_))));
    assert!(fx.backend.get_item(DOCUMENTS_KEY).unwrap().is_none());
}

#[test]
fn content_handles_import_byte_identical() {
    let fx = Fixture::new();
    let bytes: Vec<u8> = (0..=255).collect();
    let src = fx.source("photo.jpg", &bytes);
    let handle = format!("content://{}", src.display());

    let path = fx
        .store
        .import_file(&SourceLocation::parse(&handle), "photo.jpg")
        .unwrap();
    assert_eq!(std::fs::read(path).unwrap(), bytes);
}

#[test]
fn stray_files_are_tolerated() {
    let mut fx = Fixture::new();
    let doc = fx.import_and_save("a.pdf", "A", "Personal");
    let stray = fx
        .store
        .import_file(&SourceLocation::Path(fx.source("s.pdf", b"s")), "s.pdf")
        .unwrap();

    assert_eq!(fx.store.list_documents().unwrap(), vec![doc]);
    let report = fx.store.doctor().unwrap();
    assert_eq!(report.stray_files, vec![stray.clone()]);
    assert!(Path::new(&stray).exists());
}

#[test]
fn category_removal_is_blocked_by_caller_not_registry() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FsBackend::new(dir.path());
    let mut api = DocfolioApi::new(backend.clone(), DocfolioConfig::default());

    let src = dir.path().join("contract.pdf");
    std::fs::write(&src, b"%PDF-1.4").unwrap();
    let picked = PickedFile::new(src.to_string_lossy())
        .with_name("contract.pdf")
        .with_mime_type("application/pdf");
    api.add_document(Some(&picked), "Contract", "Trabajo").unwrap();

    assert!(matches!(
        api.remove_category("Trabajo", false),
        Err(DocfolioError::Api(_))
    ));

    let registry = CategoryRegistry::new(backend);
    assert!(registry.remove_category("Trabajo").unwrap());
    assert!(!registry.contains("Trabajo"));

    let listed = api.list_documents(&ListFilter::default()).unwrap();
    assert_eq!(listed.listed_documents[0].document.category, "Trabajo");
}

#[test]
fn add_category_twice_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let registry = CategoryRegistry::new(FsBackend::new(dir.path()));

    assert!(registry.add_category("Viajes").unwrap());
    assert!(!registry.add_category("Viajes").unwrap());
    let count = registry
        .get_categories()
        .iter()
        .filter(|c| c.as_str() == "Viajes")
        .count();
    assert_eq!(count, 1);
}

#[test]
fn open_reads_config_from_the_data_root() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = DocfolioConfig::default();
    config.copy_timeout_secs = 42;
    config.save(dir.path()).unwrap();

    let api = DocfolioApi::open(dir.path()).unwrap();
    assert_eq!(api.config_values().copy_timeout_secs, 42);
    assert_eq!(api.config_dir(), Some(dir.path()));
}
