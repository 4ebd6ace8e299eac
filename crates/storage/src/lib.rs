use anyhow::{anyhow, Context, Result};
use converter_core::PreferenceStore;
use serde_json::{Map, Value};
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::debug;

pub const PREFERENCES_FILE_NAME: &str = "preferences.json";
const APP_DIR_NAME: &str = "shortuuid";

/// Preferences kept in a single JSON object on disk. Keys this crate does
/// not understand are preserved on rewrite.
pub struct FilePreferences {
    path: PathBuf,
    values: Mutex<Map<String, Value>>,
}

impl FilePreferences {
    /// Opens `path`; a missing file is an empty store and is created on the
    /// first save.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => Map::new(),
            Ok(raw) => serde_json::from_str::<Map<String, Value>>(&raw).with_context(|| {
                format!("failed to parse preferences file '{}'", path.display())
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Map::new(),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to read preferences file '{}'", path.display())
                })
            }
        };

        debug!(path = %path.display(), entries = values.len(), "opened preferences");
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes a sibling temp file and renames it over the store, so a crash
    /// mid-write leaves the previous file intact.
    fn persist(&self, values: &Map<String, Value>) -> Result<()> {
        ensure_parent_dir_exists(&self.path)?;
        let raw = serde_json::to_string_pretty(values)?;
        let staging = staging_path(&self.path);
        fs::write(&staging, raw).with_context(|| {
            format!("failed to write preferences file '{}'", staging.display())
        })?;
        fs::rename(&staging, &self.path).with_context(|| {
            format!("failed to replace preferences file '{}'", self.path.display())
        })
    }
}

impl PreferenceStore for FilePreferences {
    fn load_bool(&self, key: &str) -> Result<Option<bool>> {
        let values = self
            .values
            .lock()
            .map_err(|_| anyhow!("preferences lock poisoned"))?;
        Ok(values.get(key).and_then(Value::as_bool))
    }

    fn save_bool(&self, key: &str, value: bool) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow!("preferences lock poisoned"))?;
        values.insert(key.to_string(), Value::Bool(value));
        self.persist(&values)
    }
}

/// `<config_dir>/shortuuid/preferences.json`, or the working directory when
/// no config directory is known.
pub fn default_preferences_path(config_dir: Option<PathBuf>) -> PathBuf {
    match config_dir {
        Some(dir) => dir.join(APP_DIR_NAME).join(PREFERENCES_FILE_NAME),
        None => PathBuf::from(PREFERENCES_FILE_NAME),
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| PREFERENCES_FILE_NAME.into());
    name.push(".tmp");
    path.with_file_name(name)
}

fn ensure_parent_dir_exists(path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for preferences file",
            parent.display()
        )
    })?;

    Ok(())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
