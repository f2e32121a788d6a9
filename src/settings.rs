use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::config::TrackingConfig;
use crate::resolver::SiteIdResolver;

/// Name the settings record is stored under in the host's store.
pub const SETTINGS_NAME: &str = "analytics_settings";

// ── Record ─────────────────────────────────────────────

/// Per-site analytics settings, edited through the admin form and persisted
/// as one JSON record by the host's store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    pub piwik_auth_token: String,
    pub piwik_site_id: Option<u32>,
    pub google_web_property_id: String,
}

impl AnalyticsSettings {
    /// Load the stored record, falling back to defaults when it is missing
    /// or unreadable.
    pub fn load(store: &dyn SettingsStore) -> Self {
        match store.get(SETTINGS_NAME) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("Stored analytics settings are unreadable, using defaults: {}", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn save(&self, store: &dyn SettingsStore) -> Result<(), String> {
        let raw = serde_json::to_string(self).map_err(|e| e.to_string())?;
        store.set(SETTINGS_NAME, &raw)
    }

    /// Remove the stored record entirely.
    pub fn reset(store: &dyn SettingsStore) -> Result<(), String> {
        store.delete(SETTINGS_NAME)
    }
}

// ── Storage collaborator ───────────────────────────────

/// Key-value settings storage owned by the embedding host.
pub trait SettingsStore {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&self, name: &str, value: &str) -> Result<(), String>;
    fn delete(&self, name: &str) -> Result<(), String>;
}

/// In-memory store, for hosts without their own persistence and for tests.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl SettingsStore for MemoryStore {
    fn get(&self, name: &str) -> Option<String> {
        self.values.lock().ok()?.get(name).cloned()
    }

    fn set(&self, name: &str, value: &str) -> Result<(), String> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| "settings store lock poisoned".to_string())?;
        values.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<(), String> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| "settings store lock poisoned".to_string())?;
        values.remove(name);
        Ok(())
    }
}

// ── Sanitizer ──────────────────────────────────────────

/// Sanitize a submitted settings form. Missing fields fall back to the
/// defaults (not to `current`), string fields are trimmed, and an auth-token
/// change re-resolves the tracked Piwik site id.
pub fn sanitize(
    current: &AnalyticsSettings,
    submitted: &HashMap<String, String>,
    config: &TrackingConfig,
    resolver: &dyn SiteIdResolver,
) -> AnalyticsSettings {
    let field = |key: &str| -> String {
        submitted
            .get(key)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    };

    let mut next = AnalyticsSettings {
        piwik_auth_token: field("piwik_auth_token"),
        piwik_site_id: current.piwik_site_id,
        google_web_property_id: field("google_web_property_id"),
    };

    let token_changed = next.piwik_auth_token != current.piwik_auth_token
        || (current.piwik_site_id.is_none() && !next.piwik_auth_token.is_empty());

    if token_changed {
        // The stored id belongs to the previous token; drop it and try to
        // resolve a fresh one.
        next.piwik_site_id = None;
        if config.piwik_global_tracking_rest_api.is_some() {
            match resolver.resolve(&next.piwik_auth_token) {
                Ok(id) => next.piwik_site_id = Some(id),
                Err(e) => log::warn!("Piwik site id resolution failed: {}", e),
            }
        } else {
            log::warn!(
                "Piwik auth token changed but no REST API host is configured; site id left unresolved"
            );
        }
    }

    next
}
