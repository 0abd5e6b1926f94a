use super::backend::StorageBackend;
use super::{DataStore, DoctorReport};
use crate::error::{DocfolioError, Result};
use crate::model::{Document, DocumentUpdate, SourceLocation, DEFAULT_SOURCE_NAME};
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

pub const DOCUMENTS_KEY: &str = "DOCUMENTS";
pub const DEFAULT_COPY_TIMEOUT: Duration = Duration::from_secs(10);
pub const MAX_NAME_LEN: usize = 100;

static LAST_PREFIX: AtomicU64 = AtomicU64::new(0);

/// Millisecond timestamp, strictly increasing within the process.
fn next_prefix() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut last = LAST_PREFIX.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(last + 1);
        match LAST_PREFIX.compare_exchange_weak(last, candidate, Ordering::SeqCst, Ordering::Relaxed)
        {
            Ok(_) => return candidate,
            Err(actual) => last = actual,
        }
    }
}

/// Keep `[A-Za-z0-9.-]`, replace everything else with `_`, cap the length.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .take(MAX_NAME_LEN)
        .collect()
}

fn is_timeout(err: &DocfolioError) -> bool {
    matches!(err, DocfolioError::Io(e) if e.kind() == io::ErrorKind::TimedOut)
}

pub struct DocumentStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    copy_timeout: Duration,
}

impl<B: StorageBackend> DocumentStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            copy_timeout: DEFAULT_COPY_TIMEOUT,
        }
    }

    pub fn with_copy_timeout(mut self, timeout: Duration) -> Self {
        self.copy_timeout = timeout;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn copy_timeout(&self) -> Duration {
        self.copy_timeout
    }

    fn load_index(&self) -> Result<Vec<Document>> {
        match self.backend.get_item(DOCUMENTS_KEY)? {
            Some(json) if !json.trim().is_empty() => Ok(serde_json::from_str(&json)?),
            _ => Ok(Vec::new()),
        }
    }

    fn save_index(&self, documents: &[Document]) -> Result<()> {
        let json = serde_json::to_string(documents)?;
        self.backend.set_item(DOCUMENTS_KEY, &json)
    }

    /// Drop records whose file is gone and persist the survivors if anything
    /// was dropped. Returns the survivors and how many were purged.
    fn reconcile(&self) -> Result<(Vec<Document>, usize)> {
        let documents = self.load_index()?;
        let total = documents.len();
        let mut valid = Vec::with_capacity(total);

        for doc in documents {
            if doc.uri.is_empty() {
                warn!(id = %doc.id, name = %doc.name, "record without file path dropped");
                continue;
            }
            match self.backend.exists(doc.path()) {
                Ok(true) => valid.push(doc),
                Ok(false) => {
                    warn!(id = %doc.id, name = %doc.name, uri = %doc.uri, "backing file missing, record dropped");
                }
                Err(e) => {
                    warn!(id = %doc.id, uri = %doc.uri, error = %e, "could not check backing file, record kept");
                    valid.push(doc);
                }
            }
        }

        let purged = total - valid.len();
        if purged > 0 {
            self.save_index(&valid)?;
            info!(purged, remaining = valid.len(), "document index reconciled");
        }
        Ok((valid, purged))
    }

    fn unique_destination(&self, dir: &Path, sanitized: &str) -> Result<PathBuf> {
        loop {
            let candidate = dir.join(format!("{}_{}", next_prefix(), sanitized));
            if !self.backend.exists(&candidate)? {
                return Ok(candidate);
            }
        }
    }

    /// Read the handle fully, then write it out. Some handles are plain paths
    /// in disguise, so a failed read falls back to a path copy; if that fails
    /// too the read error is the one reported.
    fn copy_from_handle(&self, handle: &str, dest: &Path, deadline: Instant) -> Result<u64> {
        let bytes = match self.backend.read_handle(handle) {
            Ok(bytes) => bytes,
            Err(read_err) => {
                debug!(handle, error = %read_err, "handle read failed, trying a path copy");
                return self
                    .backend
                    .copy_file(Path::new(handle), dest, deadline)
                    .map_err(|copy_err| if is_timeout(&copy_err) { copy_err } else { read_err });
            }
        };
        if Instant::now() >= deadline {
            return Err(io::Error::new(io::ErrorKind::TimedOut, "content handle read too slow").into());
        }
        self.backend.write_file(dest, &bytes)?;
        Ok(bytes.len() as u64)
    }
}

impl<B: StorageBackend> DataStore for DocumentStore<B> {
    fn ensure_storage_ready(&self) -> Result<PathBuf> {
        let dir = self.backend.documents_dir();
        let ready = self
            .backend
            .exists(&dir)
            .map_err(|e| DocfolioError::StorageInit(format!("{}: {}", dir.display(), e)))?;
        if !ready {
            self.backend
                .mkdir(&dir)
                .map_err(|e| DocfolioError::StorageInit(format!("{}: {}", dir.display(), e)))?;
            info!(dir = %dir.display(), "storage folder created");
        }
        Ok(dir)
    }

    fn import_file(&self, source: &SourceLocation, suggested_name: &str) -> Result<PathBuf> {
        let dir = self.ensure_storage_ready()?;
        let name = if suggested_name.trim().is_empty() {
            DEFAULT_SOURCE_NAME
        } else {
            suggested_name
        };
        let dest = self.unique_destination(&dir, &sanitize_name(name))?;
        let deadline = Instant::now() + self.copy_timeout;

        let copied = match source {
            SourceLocation::Path(path) => {
                if !self.backend.exists(path)? {
                    return Err(DocfolioError::SourceNotFound(path.display().to_string()));
                }
                debug!(from = %path.display(), to = %dest.display(), "copying file");
                self.backend.copy_file(path, &dest, deadline)
            }
            SourceLocation::Handle(handle) => {
                debug!(from = %handle, to = %dest.display(), "copying content handle");
                self.copy_from_handle(handle, &dest, deadline)
            }
        };

        let bytes = match copied {
            Ok(bytes) => bytes,
            Err(e) => {
                self.discard_import(&dest);
                if is_timeout(&e) {
                    return Err(DocfolioError::CopyTimeout(self.copy_timeout));
                }
                return Err(e);
            }
        };

        if !self.backend.exists(&dest)? {
            return Err(DocfolioError::CopyVerification(dest));
        }

        info!(dest = %dest.display(), bytes, "file imported");
        Ok(dest)
    }

    fn discard_import(&self, path: &Path) {
        match self.backend.exists(path) {
            Ok(true) => {
                if let Err(e) = self.backend.unlink(path) {
                    warn!(path = %path.display(), error = %e, "could not remove leftover file");
                }
            }
            Ok(false) => {}
            Err(e) => warn!(path = %path.display(), error = %e, "could not check leftover file"),
        }
    }

    fn save_document(&mut self, document: &Document) -> Result<()> {
        let missing: Vec<&str> = [
            ("id", &document.id),
            ("name", &document.name),
            ("uri", &document.uri),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();
        if !missing.is_empty() {
            return Err(DocfolioError::InvalidDocument(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }

        let (mut documents, _) = self.reconcile()?;
        if documents.iter().any(|d| d.id == document.id) {
            return Err(DocfolioError::InvalidDocument(format!(
                "duplicate id: {}",
                document.id
            )));
        }
        documents.push(document.clone());
        self.save_index(&documents)?;

        info!(id = %document.id, name = %document.name, "document saved");
        Ok(())
    }

    fn list_documents(&self) -> Result<Vec<Document>> {
        let (documents, _) = self.reconcile()?;
        Ok(documents)
    }

    fn get_document(&self, id: &str) -> Result<Document> {
        self.list_documents()?
            .into_iter()
            .find(|d| d.id == id)
            .ok_or_else(|| DocfolioError::DocumentNotFound(id.to_string()))
    }

    fn update_document(&mut self, id: &str, update: &DocumentUpdate) -> Result<Document> {
        let (mut documents, _) = self.reconcile()?;
        let doc = documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| DocfolioError::DocumentNotFound(id.to_string()))?;

        doc.apply(update);
        let updated = doc.clone();
        self.save_index(&documents)?;

        info!(id = %updated.id, name = %updated.name, "document updated");
        Ok(updated)
    }

    fn delete_document(&mut self, id: &str) -> Result<Document> {
        let (mut documents, _) = self.reconcile()?;
        let position = documents
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| DocfolioError::DocumentNotFound(id.to_string()))?;
        let removed = documents.remove(position);

        // File first, best effort: a failed unlink leaves a stray file, never a stale record
        match self.backend.exists(removed.path()) {
            Ok(true) => match self.backend.unlink(removed.path()) {
                Ok(()) => debug!(uri = %removed.uri, "backing file removed"),
                Err(e) => warn!(uri = %removed.uri, error = %e, "could not remove backing file"),
            },
            Ok(false) => {}
            Err(e) => warn!(uri = %removed.uri, error = %e, "could not check backing file"),
        }

        self.save_index(&documents)?;
        info!(id = %removed.id, name = %removed.name, "document deleted");
        Ok(removed)
    }

    fn read_content(&self, document: &Document) -> Result<Vec<u8>> {
        self.backend.read_file(document.path())
    }

    fn doctor(&self) -> Result<DoctorReport> {
        let storage_dir = self.backend.documents_dir();
        let storage_exists = self.backend.exists(&storage_dir).unwrap_or(false);
        let (documents, purged_records) = self.reconcile()?;

        let referenced: HashSet<&Path> = documents.iter().map(|d| d.path()).collect();
        let stray_files = self
            .backend
            .list_dir(&storage_dir)?
            .into_iter()
            .filter(|p| !referenced.contains(p.as_path()))
            .collect();

        let free_space = match self.backend.available_space(&storage_dir) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                debug!(error = %e, "free space unavailable");
                None
            }
        };

        Ok(DoctorReport {
            free_space,
            platform: std::env::consts::OS,
            storage_dir,
            storage_exists,
            document_count: documents.len(),
            purged_records,
            stray_files,
        })
    }
}
