use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{info, warn};

use super::path::{ensure_settings_file, settings_path};
use crate::error::Result;
use crate::models::{HostSettings, Settings};

/// Prefix used by the editor's own settings.json for our keys.
const EDITOR_PREFIX: &str = "daSSHboard.";

/// Load the settings store from the default location.
pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Load the settings store. Never fails: unreadable or invalid files degrade
/// to defaults. A file that is not loaded verbatim (invalid JSON or a schema
/// mismatch) is backed up first, and valid host entries survive a mismatch.
pub fn load_settings_from(path: &Path) -> Settings {
    if let Err(e) = ensure_settings_file(path) {
        warn!(path = %path.display(), error = %e, "cannot init settings file");
        return Settings::default();
    }

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read settings file");
            return Settings::default();
        }
    };

    let value = match serde_json::from_str::<Value>(&content) {
        Ok(v) => v,
        Err(e) => {
            backup(path, &content, &e.to_string());
            return Settings::default();
        }
    };

    // Current schema first
    if let Ok(settings) = serde_json::from_value::<Settings>(value.clone()) {
        if !has_editor_keys(&value) {
            return settings;
        }
    }

    // Settings copied out of the editor's settings.json ("daSSHboard.hosts", ...)
    if let Some(obj) = value.as_object() {
        if has_editor_keys(&value) {
            let stripped = strip_editor_prefix(obj);
            match serde_json::from_value::<Settings>(Value::Object(stripped.clone())) {
                Ok(settings) => {
                    info!(path = %path.display(), "migrated editor-style settings keys");
                    if let Err(e) = save_settings_to(path, &settings) {
                        warn!(error = %e, "failed to save migrated settings");
                    }
                    return settings;
                }
                Err(e) => {
                    warn!(error = %e, "editor-style settings did not match the schema");
                    backup(path, &content, &e.to_string());
                    return salvage(stripped);
                }
            }
        }
    }

    // Valid JSON, wrong shape: keep a copy, then keep whatever still parses
    backup(path, &content, "settings file did not match the schema");
    match value {
        Value::Object(obj) => salvage(obj),
        _ => Settings::default(),
    }
}

/// Copy the raw file next to itself as `.json.bak` before it can be overwritten.
fn backup(path: &Path, content: &str, reason: &str) {
    let bak = path.with_extension("json.bak");
    match fs::write(&bak, content) {
        Ok(()) => warn!(backup = %bak.display(), reason, "settings could not be loaded as-is, backed up"),
        Err(e) => warn!(backup = %bak.display(), error = %e, "failed to back up settings"),
    }
}

/// Field-by-field load: each host entry and each top-level key is kept if it
/// parses on its own, the rest falls back to defaults.
fn salvage(mut obj: Map<String, Value>) -> Settings {
    let mut hosts = BTreeMap::new();
    match obj.remove("hosts") {
        Some(Value::Object(entries)) => {
            for (name, entry) in entries {
                match serde_json::from_value::<HostSettings>(entry) {
                    Ok(hs) => {
                        hosts.insert(name, hs);
                    }
                    Err(e) => warn!(host = %name, error = %e, "skipping invalid host entry"),
                }
            }
        }
        Some(other) => warn!(found = %other, "\"hosts\" is not an object, ignoring it"),
        None => {}
    }

    let mut base = serde_json::to_value(Settings::default()).unwrap_or(Value::Null);
    if let Value::Object(defaults) = &mut base {
        for (key, v) in obj {
            let mut single = Map::new();
            single.insert(key.clone(), v.clone());
            if serde_json::from_value::<Settings>(Value::Object(single)).is_ok() {
                defaults.insert(key, v);
            } else {
                warn!(key = %key, "ignoring invalid settings value");
            }
        }
        defaults.remove("hosts");
    }
    let mut settings = serde_json::from_value::<Settings>(base).unwrap_or_default();
    settings.hosts = hosts;
    settings
}

fn has_editor_keys(value: &Value) -> bool {
    value
        .as_object()
        .map(|o| o.keys().any(|k| k.starts_with(EDITOR_PREFIX)))
        .unwrap_or(false)
}

fn strip_editor_prefix(obj: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    for (k, v) in obj {
        if let Some(rest) = k.strip_prefix(EDITOR_PREFIX) {
            out.insert(rest.to_string(), v.clone());
        } else if !k.contains('.') {
            out.entry(k.clone()).or_insert_with(|| v.clone());
        }
    }
    out
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(&settings_path(), settings)
}

/// Save the settings store (stable key order for diffs).
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut json = serde_json::to_string_pretty(settings)?;
    json.push('\n');

    // Write to a temp and then rename (best-effort cross-platform)
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &json)?;
    if let Err(e) = fs::rename(&tmp, path) {
        warn!(error = %e, "failed to move temp settings into place, writing directly");
        let _ = fs::remove_file(&tmp);
        fs::write(path, &json)?;
    }
    Ok(())
}

/// Settings plus the file they came from.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    pub settings: Settings,
}

impl SettingsStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = load_settings_from(&path);
        SettingsStore { path, settings }
    }

    pub fn open_default() -> Self {
        Self::open(settings_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<()> {
        save_settings_to(&self.path, &self.settings)
    }

    /// Re-read from disk (picks up edits made in an external editor).
    pub fn reload(&mut self) {
        self.settings = load_settings_from(&self.path);
    }
}
