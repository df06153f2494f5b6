use chart::ChartConfig;
use log::Level;
use wasm_bindgen::JsValue;
use web_sys::{window, Storage};

const KEY_PREFIX: &str = "stockcast_";

/// Global application settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Forecasting service host (e.g., "localhost")
    pub api_host: String,

    /// Forecasting service port
    pub api_port: u16,

    /// Path prefix in front of the `/api/...` endpoints, usually empty
    pub api_path: String,

    /// Use HTTPS for API requests
    pub api_use_https: bool,

    /// Default log level for the application
    pub log_level: Level,

    /// Trailing actual prices highlighted with markers
    pub recent_markers: usize,

    /// Moving-average window for the predicted curve
    pub smoothing_window: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        let chart = ChartConfig::default();
        Self {
            api_host: "localhost".to_string(),
            api_port: 5000,
            api_path: String::new(),
            api_use_https: false,
            log_level: Level::Info,
            recent_markers: chart.recent_marker_count,
            smoothing_window: chart.smoothing_window,
        }
    }
}

fn storage_key(name: &str) -> String {
    format!("{}{}", KEY_PREFIX, name)
}

fn read(storage: &Storage, name: &str) -> Option<String> {
    storage.get_item(&storage_key(name)).ok().flatten()
}

fn parse_level(value: &str) -> Option<Level> {
    match value.to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

impl AppSettings {
    /// Create settings from window location and localStorage
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };

        // More verbose logging while developing locally.
        if let Ok(hostname) = window.location().hostname() {
            if hostname == "localhost" || hostname == "127.0.0.1" {
                settings.log_level = Level::Debug;
            }
        }

        if let Ok(Some(storage)) = window.local_storage() {
            settings.apply_storage(&storage);
        }

        settings
    }

    fn apply_storage(&mut self, storage: &Storage) {
        if let Some(api_host) = read(storage, "api_host") {
            self.api_host = api_host;
        }
        if let Some(port) = read(storage, "api_port").and_then(|v| v.parse().ok()) {
            self.api_port = port;
        }
        if let Some(api_path) = read(storage, "api_path") {
            self.api_path = api_path;
        }
        if let Some(use_https) = read(storage, "api_use_https") {
            self.api_use_https = use_https.to_lowercase() == "true";
        }
        if let Some(level) = read(storage, "log_level").and_then(|v| parse_level(&v)) {
            self.log_level = level;
        }
        if let Some(count) = read(storage, "recent_markers").and_then(|v| v.parse().ok()) {
            self.recent_markers = count;
        }
        // Zero would make the moving average meaningless.
        if let Some(window) = read(storage, "smoothing_window")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|w| *w > 0)
        {
            self.smoothing_window = window;
        }
    }

    /// Save settings to localStorage
    pub fn save_to_storage(&self) -> Result<(), JsValue> {
        if let Some(window) = window() {
            if let Some(storage) = window.local_storage()? {
                storage.set_item(&storage_key("api_host"), &self.api_host)?;
                storage.set_item(&storage_key("api_port"), &self.api_port.to_string())?;
                storage.set_item(&storage_key("api_path"), &self.api_path)?;
                storage.set_item(&storage_key("api_use_https"), &self.api_use_https.to_string())?;
                storage.set_item(
                    &storage_key("log_level"),
                    &format!("{:?}", self.log_level).to_lowercase(),
                )?;
                storage.set_item(&storage_key("recent_markers"), &self.recent_markers.to_string())?;
                storage.set_item(&storage_key("smoothing_window"), &self.smoothing_window.to_string())?;
            }
        }
        Ok(())
    }

    /// Get the base API URL (protocol + host + port + prefix)
    pub fn api_base_url(&self) -> String {
        let protocol = if self.api_use_https { "https" } else { "http" };
        format!(
            "{}://{}:{}{}",
            protocol,
            self.api_host,
            self.api_port,
            self.api_path.trim_end_matches('/')
        )
    }

    /// Get the full API URL for an endpoint
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base_url(), endpoint)
    }

    pub fn chart_config(&self) -> ChartConfig {
        ChartConfig::default()
            .with_recent_marker_count(self.recent_markers)
            .with_smoothing_window(self.smoothing_window)
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::from_environment());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Update the global settings
pub fn update_settings<F>(f: F)
where
    F: FnOnce(&mut AppSettings),
{
    SETTINGS.with(|s| {
        let mut settings = s.borrow_mut();
        f(&mut settings);
    });
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
