use super::backend::{FileSystem, KeyValueStore, StorageBackend};
use crate::error::{DocfolioError, Result};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

const MEMORY_ROOT: &str = "/memory";

#[derive(Default)]
struct MemState {
    items: RefCell<HashMap<String, String>>,
    files: RefCell<BTreeMap<PathBuf, Vec<u8>>>,
    dirs: RefCell<HashSet<PathBuf>>,
    handles: RefCell<HashMap<String, Vec<u8>>>,
    fail_kv_writes: Cell<bool>,
    fail_kv_reads: Cell<bool>,
    fail_mkdir: Cell<bool>,
    fail_unlink: Cell<bool>,
    drop_copies: Cell<bool>,
    copy_delay: Cell<Option<Duration>>,
    available_space: Cell<u64>,
    fail_exists_for: RefCell<HashSet<PathBuf>>,
}

/// In-memory storage backend for testing.
///
/// Uses `Rc` + `RefCell` since docfolio is single-threaded; clones share
/// the same state, just like two handles on one real disk. The `set_*`
/// switches inject faults for exercising the error paths.
#[derive(Clone, Default)]
pub struct MemBackend {
    state: Rc<MemState>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `set_item`/`remove_item` fail.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.state.fail_kv_writes.set(simulate);
    }

    /// Make every `get_item` fail.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.state.fail_kv_reads.set(simulate);
    }

    pub fn set_simulate_mkdir_error(&self, simulate: bool) {
        self.state.fail_mkdir.set(simulate);
    }

    pub fn set_simulate_unlink_error(&self, simulate: bool) {
        self.state.fail_unlink.set(simulate);
    }

    /// Copies report success but leave nothing at the destination.
    pub fn set_drop_copies(&self, drop: bool) {
        self.state.drop_copies.set(drop);
    }

    /// Every copy takes at least this long.
    pub fn set_copy_delay(&self, delay: Option<Duration>) {
        self.state.copy_delay.set(delay);
    }

    pub fn set_available_space(&self, bytes: u64) {
        self.state.available_space.set(bytes);
    }

    /// Existence checks on `path` fail with an I/O error.
    pub fn fail_exists_for(&self, path: impl Into<PathBuf>) {
        self.state.fail_exists_for.borrow_mut().insert(path.into());
    }

    pub fn insert_file(&self, path: impl Into<PathBuf>, bytes: &[u8]) {
        self.state
            .files
            .borrow_mut()
            .insert(path.into(), bytes.to_vec());
    }

    pub fn insert_handle(&self, handle: impl Into<String>, bytes: &[u8]) {
        self.state
            .handles
            .borrow_mut()
            .insert(handle.into(), bytes.to_vec());
    }

    /// Remove a file behind the store's back.
    pub fn remove_file_externally(&self, path: &Path) -> bool {
        self.state.files.borrow_mut().remove(path).is_some()
    }

    pub fn file_bytes(&self, path: &Path) -> Option<Vec<u8>> {
        self.state.files.borrow().get(path).cloned()
    }

    pub fn file_count(&self) -> usize {
        self.state.files.borrow().len()
    }
}

fn io_err(kind: io::ErrorKind, msg: &str) -> DocfolioError {
    DocfolioError::Io(io::Error::new(kind, msg.to_string()))
}

impl KeyValueStore for MemBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        if self.state.fail_kv_reads.get() {
            return Err(DocfolioError::Persistence("Simulated read error".to_string()));
        }
        Ok(self.state.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if self.state.fail_kv_writes.get() {
            return Err(DocfolioError::Persistence("Simulated write error".to_string()));
        }
        self.state
            .items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        if self.state.fail_kv_writes.get() {
            return Err(DocfolioError::Persistence("Simulated write error".to_string()));
        }
        self.state.items.borrow_mut().remove(key);
        Ok(())
    }
}

impl FileSystem for MemBackend {
    fn exists(&self, path: &Path) -> Result<bool> {
        if self.state.fail_exists_for.borrow().contains(path) {
            return Err(io_err(io::ErrorKind::PermissionDenied, "Simulated stat error"));
        }
        Ok(self.state.files.borrow().contains_key(path) || self.state.dirs.borrow().contains(path))
    }

    fn mkdir(&self, path: &Path) -> Result<()> {
        if self.state.fail_mkdir.get() {
            return Err(io_err(io::ErrorKind::PermissionDenied, "Simulated mkdir error"));
        }
        let mut dirs = self.state.dirs.borrow_mut();
        for ancestor in path.ancestors() {
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn copy_file(&self, src: &Path, dst: &Path, deadline: Instant) -> Result<u64> {
        let bytes = self
            .state
            .files
            .borrow()
            .get(src)
            .cloned()
            .ok_or_else(|| io_err(io::ErrorKind::NotFound, "No such file"))?;

        if let Some(delay) = self.state.copy_delay.get() {
            std::thread::sleep(delay);
        }
        if Instant::now() >= deadline {
            // Leave a partial file, like an interrupted copy would
            let partial = bytes[..bytes.len() / 2].to_vec();
            self.state.files.borrow_mut().insert(dst.to_path_buf(), partial);
            return Err(io_err(io::ErrorKind::TimedOut, "copy deadline exceeded"));
        }

        let len = bytes.len() as u64;
        if !self.state.drop_copies.get() {
            self.state.files.borrow_mut().insert(dst.to_path_buf(), bytes);
        }
        Ok(len)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        self.state
            .files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| io_err(io::ErrorKind::NotFound, "No such file"))
    }

    fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if self.state.drop_copies.get() {
            return Ok(());
        }
        self.state
            .files
            .borrow_mut()
            .insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    fn unlink(&self, path: &Path) -> Result<()> {
        if self.state.fail_unlink.get() {
            return Err(io_err(io::ErrorKind::PermissionDenied, "Simulated unlink error"));
        }
        match self.state.files.borrow_mut().remove(path) {
            Some(_) => Ok(()),
            None => Err(io_err(io::ErrorKind::NotFound, "No such file")),
        }
    }

    fn read_handle(&self, handle: &str) -> Result<Vec<u8>> {
        let bytes = self
            .state
            .handles
            .borrow()
            .get(handle)
            .cloned()
            .ok_or_else(|| io_err(io::ErrorKind::NotFound, "Unknown content handle"))?;
        if let Some(delay) = self.state.copy_delay.get() {
            std::thread::sleep(delay);
        }
        Ok(bytes)
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        Ok(self
            .state
            .files
            .borrow()
            .keys()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect())
    }

    fn available_space(&self, _path: &Path) -> Result<u64> {
        Ok(self.state.available_space.get())
    }
}

impl StorageBackend for MemBackend {
    fn documents_dir(&self) -> PathBuf {
        Path::new(MEMORY_ROOT).join("documents")
    }
}
