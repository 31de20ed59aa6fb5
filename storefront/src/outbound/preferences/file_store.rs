//! JSON file preferences store built on `cap_std`.
//!
//! All keys live in one flat JSON object. Writes go to a sibling temporary
//! file that is then renamed over the original.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tokio::sync::Mutex;
use tracing::warn;

use crate::domain::ports::{PreferencesStore, PreferencesStoreError};

type Values = BTreeMap<String, String>;

/// Preferences persisted to a single JSON file.
pub struct JsonFilePreferencesStore {
    directory: Dir,
    file_name: PathBuf,
    temp_name: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFilePreferencesStore {
    /// Open the store at `path`, creating its parent directory if needed.
    ///
    /// The file itself is created on the first write.
    ///
    /// # Errors
    ///
    /// Returns an error when the path has no file name or the parent
    /// directory cannot be created or opened.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("preferences path {} has no file name", path.display()),
            )
        })?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        Dir::create_ambient_dir_all(parent, ambient_authority())?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;

        let mut temp_name = file_name.to_os_string();
        temp_name.push(".tmp");
        Ok(Self {
            directory,
            file_name: PathBuf::from(file_name),
            temp_name: PathBuf::from(temp_name),
            write_lock: Mutex::new(()),
        })
    }

    fn read_values(&self) -> Result<Values, PreferencesStoreError> {
        let contents = match self.directory.read_to_string(&self.file_name) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Values::new()),
            Err(error) => return Err(PreferencesStoreError::io(error.to_string())),
        };
        serde_json::from_str(&contents)
            .map_err(|error| PreferencesStoreError::corrupt(error.to_string()))
    }

    fn write_values(&self, values: &Values) -> Result<(), PreferencesStoreError> {
        let bytes = serde_json::to_vec_pretty(values)
            .map_err(|error| PreferencesStoreError::io(error.to_string()))?;
        self.directory
            .write(&self.temp_name, bytes)
            .and_then(|()| {
                self.directory
                    .rename(&self.temp_name, &self.directory, &self.file_name)
            })
            .map_err(|error| PreferencesStoreError::io(error.to_string()))
    }
}

#[async_trait]
impl PreferencesStore for JsonFilePreferencesStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PreferencesStoreError> {
        Ok(self.read_values()?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PreferencesStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut values = match self.read_values() {
            Ok(values) => values,
            Err(PreferencesStoreError::Corrupt { message }) => {
                warn!(%message, "replacing corrupt preferences file");
                Values::new()
            }
            Err(error) => return Err(error),
        };
        values.insert(key.to_owned(), value.to_owned());
        self.write_values(&values)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> TempDir {
        tempfile::tempdir().expect("temp dir")
    }

    #[rstest]
    #[tokio::test]
    async fn values_survive_reopening(temp_dir: TempDir) {
        let path = temp_dir.path().join("nested").join("preferences.json");

        let store = JsonFilePreferencesStore::open(&path).expect("open store");
        assert_eq!(store.get("theme").await.expect("get"), None);
        store.set("theme", "dark").await.expect("set theme");
        store.set("table_number", "12").await.expect("set table");

        let reopened = JsonFilePreferencesStore::open(&path).expect("reopen store");
        assert_eq!(
            reopened.get("theme").await.expect("get"),
            Some("dark".to_owned())
        );
        assert_eq!(
            reopened.get("table_number").await.expect("get"),
            Some("12".to_owned())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn corrupt_files_fail_reads_and_are_replaced_on_write(temp_dir: TempDir) {
        let path = temp_dir.path().join("preferences.json");
        let directory =
            Dir::open_ambient_dir(temp_dir.path(), ambient_authority()).expect("open dir");
        directory
            .write("preferences.json", b"{ not json")
            .expect("write corrupt file");

        let store = JsonFilePreferencesStore::open(&path).expect("open store");
        let error = store.get("theme").await.expect_err("corrupt file");
        assert!(matches!(error, PreferencesStoreError::Corrupt { .. }));

        store.set("theme", "light").await.expect("overwrite");
        assert_eq!(
            store.get("theme").await.expect("get"),
            Some("light".to_owned())
        );
    }

    #[test]
    fn rejects_paths_without_a_file_name() {
        let result = JsonFilePreferencesStore::open(Path::new("/"));
        assert!(result.is_err());
    }
}
