//! Configuration store
//!
//! Single source of truth for the visual configuration and its only writer.
//! Storage is a best-effort cache: read and write failures are logged and the
//! in-memory configuration stays authoritative.

use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use super::patch::ConfigPatch;
use super::settings::Configuration;
use crate::persistence::SettingsStorage;

pub struct ConfigStore<S: SettingsStorage> {
    config: Configuration,
    storage: S,
    /// Quiet period before a mutation is written; `None` writes immediately
    debounce: Option<Duration>,
    /// Time of the latest unsaved mutation
    last_mutation: Option<Instant>,
}

impl<S: SettingsStorage> ConfigStore<S> {
    /// Store holding the defaults, without touching storage
    pub fn new(storage: S) -> Self {
        Self {
            config: Configuration::default(),
            storage,
            debounce: None,
            last_mutation: None,
        }
    }

    /// Store with the persisted configuration overlaid on the defaults
    pub fn open(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.load();
        store
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = Some(debounce);
        self
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Replace the in-memory configuration with the persisted one.
    /// Missing, unreadable or malformed state yields the defaults.
    pub fn load(&mut self) -> &Configuration {
        self.last_mutation = None;
        self.config = match self.storage.read() {
            Ok(Some(contents)) => match Configuration::from_json(&contents) {
                Ok(config) => {
                    info!("Restored persisted settings");
                    config
                }
                Err(e) => {
                    warn!(error = ?e, "Ignoring malformed persisted settings");
                    Configuration::default()
                }
            },
            Ok(None) => {
                info!("No persisted settings, using defaults");
                Configuration::default()
            }
            Err(e) => {
                error!(error = ?e, "Failed to read persisted settings, using defaults");
                Configuration::default()
            }
        };
        &self.config
    }

    /// Apply a partial update. Returns whether the configuration changed.
    pub fn update(&mut self, patch: &ConfigPatch) -> bool {
        self.update_at(patch, Instant::now())
    }

    pub fn update_at(&mut self, patch: &ConfigPatch, now: Instant) -> bool {
        if patch.is_empty() {
            return false;
        }
        let next = self.config.with_patch(patch);
        if next == self.config {
            return false;
        }
        self.config = next;

        match self.debounce {
            None => self.persist(),
            Some(_) => self.last_mutation = Some(now),
        }
        true
    }

    /// Restore the defaults and remove the persisted copy
    pub fn reset(&mut self) {
        info!("Resetting settings to defaults");
        self.config = Configuration::default();
        self.last_mutation = None;
        if let Err(e) = self.storage.clear() {
            error!(error = ?e, "Failed to clear persisted settings");
        }
    }

    /// Write the full configuration to the slot, replacing any previous value
    pub fn persist(&mut self) {
        self.last_mutation = None;

        let contents = match self.config.to_json() {
            Ok(contents) => contents,
            Err(e) => {
                error!(error = ?e, "Failed to serialize settings");
                return;
            }
        };
        match self.storage.write(&contents) {
            Ok(()) => debug!(bytes = contents.len(), "Persisted settings"),
            Err(e) => error!(error = ?e, "Failed to persist settings, keeping them in memory only"),
        }
    }

    pub fn has_pending_write(&self) -> bool {
        self.last_mutation.is_some()
    }

    /// When the pending write becomes due, if any
    pub fn flush_deadline(&self) -> Option<Instant> {
        let debounce = self.debounce?;
        self.last_mutation.map(|at| at + debounce)
    }

    /// Write pending changes once the debounce period has elapsed.
    /// Returns whether a write happened.
    pub fn flush_due(&mut self, now: Instant) -> bool {
        match self.flush_deadline() {
            Some(deadline) if now >= deadline => {
                self.persist();
                true
            }
            _ => false,
        }
    }

    /// Write pending changes right away
    pub fn flush(&mut self) {
        if self.has_pending_write() {
            self.persist();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::patch::DevicePatch;
    use crate::config::settings::{ActiveDevice, DeviceKind};
    use crate::persistence::MemoryStorage;
    use serde_json::json;

    fn patch(value: serde_json::Value) -> ConfigPatch {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_update_clamps_and_persists() {
        let mut store = ConfigStore::new(MemoryStorage::new());
        assert!(store.update(&patch(json!({"iphone": {"contentScale": 5.0}}))));
        assert_eq!(store.config().iphone.content_scale, 2.0);

        let stored = Configuration::from_json(store.storage().contents().unwrap()).unwrap();
        assert_eq!(stored.iphone.content_scale, 2.0);
    }

    #[test]
    fn test_persist_then_load_on_fresh_store() {
        let mut store = ConfigStore::new(MemoryStorage::new());
        store.update(&patch(json!({
            "gradient": {"startColor": "#ff512f", "directionDegrees": "45deg"},
            "activeDevice": "both",
            "websiteUrl": "https://crates.io",
            "macbook": {"cornerRadiusPx": 8, "deviceScale": 0.75},
            "shadow": {"enabled": false, "spreadPx": -6},
            "backgroundImage": {"enabled": true, "imageData": "data:image/png;base64,AAAA", "rotationDegrees": 30},
            "isDarkMode": true
        })));
        store.persist();

        let storage = MemoryStorage::with_contents(store.storage().contents().unwrap());
        let fresh = ConfigStore::open(storage);
        assert_eq!(fresh.config(), store.config());
    }

    #[test]
    fn test_persist_then_load_keeps_exact_floats() {
        let samples = [
            (14.0 * 0.1, 0.1 + 0.2),
            (1.9912121352089938, 0.9854228981833913),
            (1.3718788259976367, 0.6588346989560897),
            (0.5 + 0.05 * 19.0, 0.7 * 0.9),
        ];
        for (scale, fraction) in samples {
            let mut store = ConfigStore::new(MemoryStorage::new());
            store.update(&patch(json!({
                "iphone": {"contentScale": scale, "deviceScale": fraction + 0.5},
                "macbook": {"contentScale": fraction + 1.0},
                "shadow": {"opacity": fraction},
                "backgroundImage": {"scale": scale + 1.0}
            })));
            assert_eq!(store.config().iphone.content_scale, scale);

            let fresh = ConfigStore::open(MemoryStorage::with_contents(store.storage().contents().unwrap()));
            assert_eq!(fresh.config(), store.config(), "drift for {scale} / {fraction}");
        }
    }

    #[test]
    fn test_malformed_blob_loads_defaults() {
        let store = ConfigStore::open(MemoryStorage::with_contents("{\"gradient\": {\"startCol"));
        assert_eq!(store.config(), &Configuration::default());
    }

    #[test]
    fn test_unavailable_storage_is_soft() {
        let mut store = ConfigStore::open(MemoryStorage::unavailable());
        assert_eq!(store.config(), &Configuration::default());

        // Write failure keeps the in-memory value
        assert!(store.update(&ConfigPatch::dark_mode(true)));
        assert!(store.config().is_dark_mode);

        store.reset();
        assert!(!store.config().is_dark_mode);
    }

    #[test]
    fn test_device_switch_preserves_iphone_settings() {
        let mut store = ConfigStore::new(MemoryStorage::new());
        store.update(&ConfigPatch::device(
            DeviceKind::Iphone,
            DevicePatch { content_scale: Some(1.3), corner_radius_px: Some(24), device_scale: Some(1.1) },
        ));
        let iphone = store.config().iphone.clone();

        store.update(&ConfigPatch::select_device(ActiveDevice::Macbook));
        assert_eq!(store.config().macbook.corner_radius_px, 0);
        store.update(&ConfigPatch::select_device(ActiveDevice::Iphone));
        assert_eq!(store.config().iphone, iphone);
    }

    #[test]
    fn test_default_scenario_macbook_radius() {
        let mut store = ConfigStore::new(MemoryStorage::new());
        assert_eq!(store.config().gradient.start_color, "#56ab2f");
        assert_eq!(store.config().gradient.end_color, "#a8e6cf");
        assert_eq!(store.config().gradient.direction.degrees(), 135);
        assert_eq!(store.config().active_device, ActiveDevice::Iphone);
        assert_eq!(store.config().iphone.corner_radius_px, 50);

        store.update(&patch(json!({"activeDevice": "macbook"})));
        assert_eq!(store.config().macbook.corner_radius_px, 0);
        assert_eq!(store.config().iphone.corner_radius_px, 50);
    }

    #[test]
    fn test_reset_restores_defaults_and_clears_slot() {
        let mut store = ConfigStore::new(MemoryStorage::new());
        store.update(&ConfigPatch::website_url("https://blog.rust-lang.org"));
        store.update(&ConfigPatch::dark_mode(true));
        store.update(&patch(json!({"shadow": {"blurPx": 70}})));
        assert!(store.storage().contents().is_some());

        store.reset();
        assert_eq!(store.config(), &Configuration::default());
        assert_eq!(store.storage().contents(), None);

        store.load();
        assert_eq!(store.config(), &Configuration::default());
    }

    #[test]
    fn test_noop_update_does_not_write() {
        let mut store = ConfigStore::new(MemoryStorage::new());
        assert!(!store.update(&ConfigPatch::default()));
        assert!(!store.update(&ConfigPatch::select_device(ActiveDevice::Iphone)));
        assert_eq!(store.storage().contents(), None);
    }

    #[test]
    fn test_debounced_writes_wait_for_quiet_period() {
        let mut store = ConfigStore::new(MemoryStorage::new()).with_debounce(Duration::from_millis(250));
        let start = Instant::now();

        store.update_at(&patch(json!({"shadow": {"blurPx": 10}})), start);
        store.update_at(&patch(json!({"shadow": {"blurPx": 20}})), start + Duration::from_millis(200));
        assert!(store.has_pending_write());
        assert_eq!(store.storage().contents(), None);

        // Deadline follows the latest mutation
        assert!(!store.flush_due(start + Duration::from_millis(300)));
        assert!(store.flush_due(start + Duration::from_millis(450)));
        assert!(!store.has_pending_write());

        let stored = Configuration::from_json(store.storage().contents().unwrap()).unwrap();
        assert_eq!(stored.shadow.blur_px, 20);
    }

    #[test]
    fn test_flush_writes_pending_immediately() {
        let mut store = ConfigStore::new(MemoryStorage::new()).with_debounce(Duration::from_secs(10));
        store.update(&ConfigPatch::dark_mode(true));
        assert_eq!(store.storage().contents(), None);
        store.flush();
        assert!(store.storage().contents().is_some());
    }

    #[test]
    fn test_reset_cancels_pending_write() {
        let mut store = ConfigStore::new(MemoryStorage::new()).with_debounce(Duration::from_millis(100));
        let start = Instant::now();
        store.update_at(&ConfigPatch::dark_mode(true), start);
        store.reset();
        assert!(!store.flush_due(start + Duration::from_secs(1)));
        assert_eq!(store.storage().contents(), None);
    }
}
