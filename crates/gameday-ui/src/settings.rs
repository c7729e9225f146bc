//! User preferences and the key/value store behind them.
//!
//! Preferences live as one JSON object under the `settings` key. Every save
//! broadcasts a payload-free [`SettingsChanged`] so the dashboard can
//! re-fetch in the new unit.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use gameday_weather::TemperatureUnit;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

pub const SETTINGS_KEY: &str = "settings";
pub const API_KEY_KEY: &str = "openweatherApiKey";
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// String key/value storage. Implementations swallow their own failures.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.lock().insert(key.to_string(), value.to_string());
    }
}

/// A JSON object file holding every key. Values are kept in memory as well,
/// so a file that cannot be read or written degrades to a memory store.
/// An existing file that cannot be read is never overwritten.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    values: Mutex<HashMap<String, String>>,
    writable: bool,
}

impl FilePreferenceStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (values, writable) = if path.exists() {
            match read_values(&path) {
                Ok(values) => (values, true),
                Err(e) => {
                    tracing::warn!("Preferences unreadable, using memory only: {:#}", e);
                    (HashMap::new(), false)
                }
            }
        } else {
            (HashMap::new(), true)
        };

        Self {
            path,
            values: Mutex::new(values),
            writable,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut values = self.values.lock();
        values.insert(key.to_string(), value.to_string());
        if !self.writable {
            tracing::debug!("Keeping {} in memory; {} is left untouched", key, self.path.display());
            return;
        }
        if let Err(e) = write_values(&self.path, &values) {
            tracing::warn!("Could not persist preferences, kept in memory: {:#}", e);
        }
    }
}

fn read_values(path: &Path) -> anyhow::Result<HashMap<String, String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).context("Preferences file is not a JSON object of strings")
}

fn write_values(path: &Path, values: &HashMap<String, String>) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create preferences directory")?;
    }
    let contents = serde_json::to_string_pretty(values)?;
    std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

/// Alert thresholds in °F, mph and mm/h.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertThresholds {
    pub high_temp: f64,
    pub low_temp: f64,
    pub wind_speed: f64,
    pub rain_amount: f64,
    pub snow_amount: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            high_temp: 90.0,
            low_temp: 32.0,
            wind_speed: 20.0,
            rain_amount: 5.0,
            snow_amount: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub temperature_unit: TemperatureUnit,
    pub dark_mode: bool,
    pub alerts: AlertThresholds,
    pub show_alerts: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            temperature_unit: TemperatureUnit::Fahrenheit,
            dark_mode: false,
            alerts: AlertThresholds::default(),
            show_alerts: true,
        }
    }
}

/// Partial update. `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferencesUpdate {
    pub temperature_unit: Option<TemperatureUnit>,
    pub dark_mode: Option<bool>,
    pub alerts: Option<AlertThresholds>,
    pub show_alerts: Option<bool>,
}

impl PreferencesUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply(self, prefs: &mut UserPreferences) {
        if let Some(unit) = self.temperature_unit {
            prefs.temperature_unit = unit;
        }
        if let Some(dark) = self.dark_mode {
            prefs.dark_mode = dark;
        }
        if let Some(alerts) = self.alerts {
            prefs.alerts = alerts;
        }
        if let Some(show) = self.show_alerts {
            prefs.show_alerts = show;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsChanged;

pub struct SettingsService {
    store: Arc<dyn PreferenceStore>,
    changed_tx: broadcast::Sender<SettingsChanged>,
    api_key_env: Option<String>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        let (changed_tx, _) = broadcast::channel(16);
        Self {
            store,
            changed_tx,
            api_key_env: Some(API_KEY_ENV.to_string()),
        }
    }

    /// Environment variable consulted when the store has no API key.
    /// `None` disables the fallback.
    pub fn with_api_key_env(mut self, var: Option<&str>) -> Self {
        self.api_key_env = var.map(str::to_string);
        self
    }

    /// Current preferences. Unparseable stored values fall back to defaults.
    pub fn load(&self) -> UserPreferences {
        let Some(raw) = self.store.get(SETTINGS_KEY) else {
            return UserPreferences::default();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::debug!("Stored settings unparseable, using defaults: {}", e);
            UserPreferences::default()
        })
    }

    /// Merge `update` into the current preferences, persist and notify.
    pub fn save(&self, update: PreferencesUpdate) -> UserPreferences {
        let mut prefs = self.load();
        update.apply(&mut prefs);

        match serde_json::to_string(&prefs) {
            Ok(json) => self.store.set(SETTINGS_KEY, &json),
            Err(e) => tracing::warn!("Could not serialize settings: {}", e),
        }

        self.notify();
        prefs
    }

    pub fn toggle_dark_mode(&self) -> bool {
        let dark = !self.load().dark_mode;
        self.save(PreferencesUpdate {
            dark_mode: Some(dark),
            ..Default::default()
        });
        dark
    }

    pub fn api_key(&self) -> Option<String> {
        self.store
            .get(API_KEY_KEY)
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                self.api_key_env
                    .as_deref()
                    .and_then(|var| std::env::var(var).ok())
                    .filter(|k| !k.trim().is_empty())
            })
    }

    pub fn set_api_key(&self, key: &str) {
        self.store.set(API_KEY_KEY, key.trim());
        self.notify();
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SettingsChanged> {
        self.changed_tx.subscribe()
    }

    fn notify(&self) {
        // No receivers is fine
        let _ = self.changed_tx.send(SettingsChanged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> SettingsService {
        SettingsService::new(Arc::new(MemoryPreferenceStore::new())).with_api_key_env(None)
    }

    #[test]
    fn test_defaults_when_nothing_stored() {
        let prefs = service().load();
        assert_eq!(prefs.temperature_unit, TemperatureUnit::Fahrenheit);
        assert!(!prefs.dark_mode);
        assert!(prefs.show_alerts);
        assert_eq!(prefs.alerts.high_temp, 90.0);
        assert_eq!(prefs.alerts.snow_amount, 2.0);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let settings = service();
        settings.save(PreferencesUpdate {
            temperature_unit: Some(TemperatureUnit::Celsius),
            dark_mode: Some(true),
            ..Default::default()
        });

        let prefs = settings.load();
        assert_eq!(prefs.temperature_unit, TemperatureUnit::Celsius);
        assert!(prefs.dark_mode);
        assert!(prefs.show_alerts);
    }

    #[test]
    fn test_unspecified_fields_keep_prior_values() {
        let settings = service();
        settings.save(PreferencesUpdate {
            dark_mode: Some(true),
            show_alerts: Some(false),
            ..Default::default()
        });
        settings.save(PreferencesUpdate {
            temperature_unit: Some(TemperatureUnit::Celsius),
            ..Default::default()
        });

        let prefs = settings.load();
        assert!(prefs.dark_mode);
        assert!(!prefs.show_alerts);
        assert_eq!(prefs.temperature_unit, TemperatureUnit::Celsius);
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        let store = Arc::new(MemoryPreferenceStore::new());
        store.set(SETTINGS_KEY, "{not json");
        let settings = SettingsService::new(store);
        assert_eq!(settings.load(), UserPreferences::default());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let store = Arc::new(MemoryPreferenceStore::new());
        store.set(SETTINGS_KEY, r#"{"temperatureUnit":"C","alerts":{"highTemp":85}}"#);
        let prefs = SettingsService::new(store).load();
        assert_eq!(prefs.temperature_unit, TemperatureUnit::Celsius);
        assert_eq!(prefs.alerts.high_temp, 85.0);
        assert_eq!(prefs.alerts.low_temp, 32.0);
        assert!(prefs.show_alerts);
    }

    #[test]
    fn test_stored_json_uses_camel_case() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let settings = SettingsService::new(store.clone());
        settings.save(PreferencesUpdate::default());
        let raw = store.get(SETTINGS_KEY).unwrap();
        assert!(raw.contains("\"temperatureUnit\":\"F\""));
        assert!(raw.contains("\"darkMode\":false"));
        assert!(raw.contains("\"showAlerts\":true"));
    }

    #[test]
    fn test_save_notifies_subscribers() {
        let settings = service();
        let mut rx = settings.subscribe();
        settings.toggle_dark_mode();
        assert_eq!(rx.try_recv(), Ok(SettingsChanged));
        assert!(settings.load().dark_mode);
    }

    #[test]
    fn test_api_key_round_trip() {
        let settings = service();
        assert_eq!(settings.api_key(), None);
        settings.set_api_key("  abc123 ");
        assert_eq!(settings.api_key().as_deref(), Some("abc123"));
        settings.set_api_key("");
        assert_eq!(settings.api_key(), None);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs").join("preferences.json");

        FilePreferenceStore::open(&path).set(API_KEY_KEY, "k1");
        let reopened = FilePreferenceStore::open(&path);
        assert_eq!(reopened.get(API_KEY_KEY).as_deref(), Some("k1"));
    }

    #[test]
    fn test_file_store_unreadable_file_degrades_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let store = FilePreferenceStore::open(&path);
        assert_eq!(store.get(SETTINGS_KEY), None);
        store.set("k", "v");
        assert_eq!(store.get("k").as_deref(), Some("v"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[1, 2, 3]");
    }

    #[test]
    fn test_file_store_write_failure_keeps_value() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be written as a file
        let store = FilePreferenceStore::open(dir.path());
        store.set("k", "v");
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }
}
