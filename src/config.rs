use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::SettingsError;
use crate::host::{PinnedPathStore, SettingsStore};
use crate::models::Settings;
use crate::pinned::PinnedPaths;

/// File name of the persisted settings blob inside the data directory.
pub const SETTINGS_FILE: &str = "data.json";

/// SettingsManager handles loading, saving, and updating the persisted
/// settings blob.
///
/// - Thread-safe access via RwLock
/// - Every change is written to disk immediately
/// - Merges saved settings with defaults for missing fields
///
/// It is also the owner of the pinned-path list, which the panel reaches
/// through [`PinnedPathStore`].
pub struct SettingsManager {
    /// The current settings
    settings: RwLock<Settings>,
    /// Path to the settings file
    settings_path: PathBuf,
}

impl SettingsManager {
    /// Creates a SettingsManager in the platform data directory.
    ///
    /// On Linux: ~/.local/share/navtree/data.json
    /// On macOS: ~/Library/Application Support/navtree/data.json
    /// On Windows: C:\Users\{user}\AppData\Roaming\navtree\data.json
    pub fn open_default() -> Result<Self, SettingsError> {
        let dir = dirs::data_dir().ok_or(SettingsError::NoDataDir)?.join("navtree");
        Self::new(dir.join(SETTINGS_FILE))
    }

    /// Creates a new SettingsManager with the given settings file path.
    ///
    /// Loads existing settings from disk, merging with defaults for any
    /// missing fields.
    pub fn new(settings_path: PathBuf) -> Result<Self, SettingsError> {
        let settings = Self::load_from_file(&settings_path)?;
        log::debug!(
            "Loaded settings from {} ({} pinned paths)",
            settings_path.display(),
            settings.pinned_paths.len()
        );
        Ok(Self {
            settings: RwLock::new(settings),
            settings_path,
        })
    }

    /// Loads settings from file, merging with defaults.
    ///
    /// A missing file yields the defaults.
    fn load_from_file(path: &Path) -> Result<Settings, SettingsError> {
        if !path.exists() {
            return Ok(Settings::default());
        }
        let content = fs::read_to_string(path).map_err(SettingsError::Read)?;
        merge_settings_with_defaults(&content)
    }

    fn read(&self) -> RwLockReadGuard<'_, Settings> {
        self.settings.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Settings> {
        self.settings.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Gets a clone of the current settings.
    pub fn get(&self) -> Settings {
        self.read().clone()
    }

    /// Updates the settings in memory without persisting.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.write();
        f(&mut settings);
    }

    /// Updates the settings and writes them to disk.
    pub fn update_and_save<F>(&self, f: F) -> Result<(), SettingsError>
    where
        F: FnOnce(&mut Settings),
    {
        self.update(f);
        self.save_sync()
    }

    /// Saves the settings to disk immediately.
    pub fn save_sync(&self) -> Result<(), SettingsError> {
        let content =
            serde_json::to_string_pretty(&*self.read()).map_err(SettingsError::Serialize)?;
        if let Some(dir) = self.settings_path.parent() {
            fs::create_dir_all(dir).map_err(SettingsError::Write)?;
        }
        fs::write(&self.settings_path, content).map_err(SettingsError::Write)
    }

    /// Returns the settings file path.
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    fn update_pins<R>(&self, f: impl FnOnce(&mut PinnedPaths) -> R) -> Result<R, SettingsError> {
        let result = {
            let mut settings = self.write();
            let mut pins = PinnedPaths::from_vec(std::mem::take(&mut settings.pinned_paths));
            let result = f(&mut pins);
            settings.pinned_paths = pins.into_vec();
            result
        };
        self.save_sync()?;
        Ok(result)
    }
}

impl SettingsStore for SettingsManager {
    fn settings(&self) -> Settings {
        self.get()
    }

    fn update_settings(&self, f: &mut dyn FnMut(&mut Settings)) -> Result<(), SettingsError> {
        self.update_and_save(|settings| f(settings))
    }
}

impl PinnedPathStore for SettingsManager {
    fn pinned_paths(&self) -> Vec<String> {
        self.read().pinned_paths.clone()
    }

    fn add_pinned_path(&self, path: &str) -> Result<bool, SettingsError> {
        if self.read().pinned_paths.iter().any(|p| p == path) {
            return Ok(false);
        }
        self.update_pins(|pins| pins.add(path))
    }

    fn remove_pinned_path(&self, path: &str) -> Result<bool, SettingsError> {
        if !self.read().pinned_paths.iter().any(|p| p == path) {
            return Ok(false);
        }
        self.update_pins(|pins| pins.remove(path))
    }

    fn save_pinned_paths(&self, paths: Vec<String>) -> Result<(), SettingsError> {
        self.update_pins(|pins| *pins = PinnedPaths::from_vec(paths))
    }
}

/// Merges a partial settings JSON with defaults.
///
/// Fields that are missing or of the wrong type keep their default value.
pub fn merge_settings_with_defaults(partial_json: &str) -> Result<Settings, SettingsError> {
    if partial_json.trim().is_empty() {
        return Ok(Settings::default());
    }

    let json_value: serde_json::Value =
        serde_json::from_str(partial_json).map_err(SettingsError::Parse)?;

    let mut settings = Settings::default();

    if let Some(obj) = json_value.as_object() {
        if let Some(v) = obj.get("showRootNav").and_then(|v| v.as_bool()) {
            settings.show_root_nav = v;
        }
        if let Some(v) = obj.get("hideAttachments").and_then(|v| v.as_bool()) {
            settings.hide_attachments = v;
        }
        if let Some(v) = obj.get("attachmentFolders").and_then(|v| v.as_array()) {
            settings.attachment_folders = string_items(v);
        }
        if let Some(v) = obj.get("openOnStartup").and_then(|v| v.as_bool()) {
            settings.open_on_startup = v;
        }
        if let Some(v) = obj.get("pinnedPaths").and_then(|v| v.as_array()) {
            settings.pinned_paths = PinnedPaths::from_vec(string_items(v)).into_vec();
        }
    }

    Ok(settings)
}

fn string_items(values: &[serde_json::Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(|item| item.as_str().map(|s| s.to_string()))
        .collect()
}
