//! JSON-file preference store.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;

use crate::error::{Result, TabviewError};

use super::gateway::PreferenceStore;

/// Stores every key in a single pretty-printed JSON object on disk.
///
/// The file is re-read on every access, so several processes pointed at the
/// same file see each other's writes.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(TabviewError::Persistence(format!(
                    "Failed to open preferences '{}': {}",
                    self.path.display(),
                    e
                )));
            }
        };

        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            TabviewError::Persistence(format!(
                "Failed to parse preferences '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    TabviewError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        // Temp file beside the target, renamed over it once synced.
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| {
            TabviewError::Persistence(format!(
                "Failed to create temp file in '{}': {}",
                dir.display(),
                e
            ))
        })?;

        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, values).map_err(|e| {
                TabviewError::Persistence(format!("Failed to serialize preferences: {}", e))
            })?;
            writer.flush().map_err(|e| {
                TabviewError::Persistence(format!("Failed to write preferences: {}", e))
            })?;
        }
        tmp.as_file().sync_all().map_err(|e| {
            TabviewError::Persistence(format!("Failed to sync preferences: {}", e))
        })?;

        tmp.persist(&self.path).map_err(|e| {
            TabviewError::Persistence(format!(
                "Failed to replace preferences '{}': {}",
                self.path.display(),
                e.error
            ))
        })?;
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| TabviewError::Persistence("preference lock poisoned".to_string()))?;
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }
}

/// Default preferences file for a data file: `<dir>/.tabview/preferences.json`.
///
/// # Example
///
/// ```
/// use tabview::persistence::preferences_path;
///
/// let path = preferences_path("data/people.csv");
/// assert_eq!(path.to_string_lossy(), "data/.tabview/preferences.json");
/// ```
pub fn preferences_path(data_path: impl AsRef<Path>) -> PathBuf {
    let parent = data_path.as_ref().parent().unwrap_or(Path::new("."));
    parent.join(".tabview").join("preferences.json")
}
