use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use super::{SliceStore, StoreError};

const LOCK_FILE: &str = ".lock";

/// One JSON file per key inside a data directory.
///
/// Writes go to a temporary file that is renamed over the target while an
/// advisory lock on `<dir>/.lock` is held, so a reader never sees a
/// half-written slice. Concurrent writers from other processes are
/// serialized per write but otherwise last-write-wins.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (or create) the store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Lock {
            path: dir.clone(),
            source,
        })?;
        debug!(dir = %dir.display(), "Opened JSON file store");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> io::Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid store key '{}'", key),
            ));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    fn lock(&self) -> Result<File, StoreError> {
        let path = self.dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|source| StoreError::Lock {
                path: path.clone(),
                source,
            })?;
        file.lock_exclusive()
            .map_err(|source| StoreError::Lock { path, source })?;
        Ok(file)
    }
}

impl SliceStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let read_err = |source| StoreError::Read {
            key: key.to_string(),
            source,
        };
        let path = self.path_for(key).map_err(read_err)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(read_err(e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            key: key.to_string(),
            source,
        };
        let path = self.path_for(key).map_err(write_err)?;
        let tmp = path.with_extension("json.tmp");

        let lock = self.lock()?;
        let result = (|| -> io::Result<()> {
            let mut file = File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp, &path)
        })();
        let _ = lock.unlock();

        result.map_err(write_err)?;
        debug!(key, bytes = value.len(), "Wrote slice");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            key: key.to_string(),
            source,
        };
        let path = self.path_for(key).map_err(write_err)?;
        let lock = self.lock()?;
        let result = match fs::remove_file(&path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        };
        let _ = lock.unlock();
        result.map_err(write_err)
    }
}
