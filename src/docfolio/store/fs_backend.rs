use super::backend::{FileSystem, KeyValueStore, StorageBackend};
use crate::error::{DocfolioError, Result};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use uuid::Uuid;

const DOCUMENTS_FOLDER: &str = "documents";
const STORAGE_FOLDER: &str = "storage";
const CONTENT_SCHEME: &str = "content://";
const COPY_CHUNK: usize = 64 * 1024;

/// Production backend: real files under a data root, one file per key for
/// the key-value side.
///
/// ```text
/// <root>/
/// ├── documents/          # imported files
/// └── storage/
///     ├── DOCUMENTS       # JSON index
///     └── CATEGORIES      # JSON list
/// ```
#[derive(Debug, Clone)]
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn storage_dir(&self) -> PathBuf {
        self.root.join(STORAGE_FOLDER)
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(DocfolioError::Persistence(format!(
                "Invalid storage key: {:?}",
                key
            )));
        }
        Ok(self.storage_dir().join(key))
    }
}

fn persistence(key: &str, err: io::Error) -> DocfolioError {
    DocfolioError::Persistence(format!("{}: {}", key, err))
}

impl KeyValueStore for FsBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(persistence(key, e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        let dir = self.storage_dir();
        fs::create_dir_all(&dir).map_err(|e| persistence(key, e))?;

        // Atomic write: a crash never leaves a half-written value behind
        let tmp = dir.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp, value).map_err(|e| persistence(key, e))?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(persistence(key, e));
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(persistence(key, e)),
        }
    }
}

impl FileSystem for FsBackend {
    fn exists(&self, path: &Path) -> Result<bool> {
        Ok(path.try_exists()?)
    }

    fn mkdir(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)?;
        Ok(())
    }

    fn copy_file(&self, src: &Path, dst: &Path, deadline: Instant) -> Result<u64> {
        let mut reader = File::open(src)?;
        let mut writer = File::create(dst)?;
        let mut buf = vec![0u8; COPY_CHUNK];
        let mut copied = 0u64;

        loop {
            if Instant::now() >= deadline {
                return Err(io::Error::new(io::ErrorKind::TimedOut, "copy deadline exceeded").into());
            }
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            writer.write_all(&buf[..n])?;
            copied += n as u64;
        }

        writer.flush()?;
        Ok(copied)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path)?)
    }

    fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        fs::write(path, bytes)?;
        Ok(())
    }

    fn unlink(&self, path: &Path) -> Result<()> {
        fs::remove_file(path)?;
        Ok(())
    }

    fn read_handle(&self, handle: &str) -> Result<Vec<u8>> {
        // Handles resolve to the path after the scheme on a plain filesystem
        let path = handle.strip_prefix(CONTENT_SCHEME).ok_or_else(|| {
            DocfolioError::SourceNotFound(format!("Unsupported content handle: {}", handle))
        })?;
        Ok(fs::read(path)?)
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut files = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let file_path = entry.path();
            if file_path.is_file() {
                files.push(file_path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn available_space(&self, path: &Path) -> Result<u64> {
        // The documents folder may not exist yet; ask about its closest existing ancestor
        let existing = path
            .ancestors()
            .find(|p| p.exists())
            .unwrap_or_else(|| Path::new("/"));
        Ok(available_bytes(existing)?)
    }
}

#[cfg(unix)]
fn available_bytes(path: &Path) -> io::Result<u64> {
    use std::ffi::CString;
    use std::mem::MaybeUninit;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let mut stat = MaybeUninit::<libc::statvfs>::uninit();
    // SAFETY: `c_path` is NUL-terminated and `stat` is only read after statvfs succeeds
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), stat.as_mut_ptr()) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    let stat = unsafe { stat.assume_init() };
    Ok(stat.f_bavail as u64 * stat.f_frsize as u64)
}

#[cfg(not(unix))]
fn available_bytes(_path: &Path) -> io::Result<u64> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "free space is only reported on unix",
    ))
}

impl StorageBackend for FsBackend {
    fn documents_dir(&self) -> PathBuf {
        self.root.join(DOCUMENTS_FOLDER)
    }
}
