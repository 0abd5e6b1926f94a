use crate::error::Result;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// String key-value persistence (the metadata side of storage).
pub trait KeyValueStore {
    /// Returns Ok(None) when the key was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Raw file I/O (the bytes side of storage).
///
/// All methods take `&self`; implementations handle their own mutability.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> Result<bool>;

    /// Create a directory and any missing parents. Succeeds if it already exists.
    fn mkdir(&self, path: &Path) -> Result<()>;

    /// Copy `src` to `dst`, giving up once `deadline` has passed.
    /// Returns the number of bytes copied. A timeout surfaces as an
    /// `io::ErrorKind::TimedOut` wrapped in `DocfolioError::Io`.
    fn copy_file(&self, src: &Path, dst: &Path, deadline: Instant) -> Result<u64>;

    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;

    fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<()>;

    fn unlink(&self, path: &Path) -> Result<()>;

    /// Read an opaque content handle (`content://…`) in full.
    fn read_handle(&self, handle: &str) -> Result<Vec<u8>>;

    /// Files directly inside `path`. Missing directories list as empty.
    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// Bytes available to unprivileged writers on the volume holding `path`.
    fn available_space(&self, path: &Path) -> Result<u64>;
}

/// A backend that provides both halves. Document store, category registry and
/// session all sit on clones of the same backend, so clones must share state.
pub trait StorageBackend: KeyValueStore + FileSystem + Clone {
    /// The app-private folder imported files are copied into.
    fn documents_dir(&self) -> PathBuf;
}
