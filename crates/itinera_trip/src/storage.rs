use std::{
    collections::HashMap,
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use parking_lot::Mutex;

use crate::error::StorageError;

/// Key under which the trip snapshot is stored.
pub const TRIP_STORAGE_KEY: &str = "itinera_trip";

/// Durable key-value storage.
///
/// `save` must not return before the value is durable.
pub trait TripStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S> TripStorage for &S
where
    S: TripStorage + ?Sized,
{
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<S> TripStorage for Arc<S>
where
    S: TripStorage + ?Sized,
{
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError {
    let path = path.to_path_buf();
    move |source| StorageError::Io { path, source }
}

/// One `<key>.json` file per key inside a directory.
///
/// Writes go to a temporary file that is synced and renamed over the
/// previous snapshot, so readers only ever see complete values.
pub struct FileStorage {
    directory: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(directory: P) -> Result<Self, StorageError> {
        let directory = directory.as_ref().to_path_buf();
        std::fs::create_dir_all(&directory).map_err(io_error(&directory))?;

        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn path(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{key}.json"))
    }

    #[cfg(unix)]
    fn sync_directory(&self) -> Result<(), StorageError> {
        std::fs::File::open(&self.directory)
            .and_then(|directory| directory.sync_all())
            .map_err(io_error(&self.directory))
    }

    #[cfg(not(unix))]
    fn sync_directory(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

impl TripStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path(key);

        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(&path)(err)),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path(key);
        let tmp_path = self.directory.join(format!(".{key}.json.tmp"));

        let mut file = std::fs::File::create(&tmp_path).map_err(io_error(&tmp_path))?;
        file.write_all(value.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(io_error(&tmp_path))?;

        std::fs::rename(&tmp_path, &path).map_err(io_error(&path))?;
        self.sync_directory()
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path(key);

        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(&path)(err)),
        }
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage
            .entries
            .lock()
            .insert(key.to_string(), value.to_string());
        storage
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }
}

impl TripStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}
