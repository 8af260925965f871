use std::{fmt, fs, path::Path, str::FromStr, time::Duration};

use serde::Deserialize;
use shared::domain::UnknownVariant;
use tracing::warn;

pub const DEFAULT_SETTINGS_FILE: &str = "catalog.toml";
pub const EXTENDED_DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiVariant {
    Basic,
    // category, stock, tags, image, rating; statistics and categories endpoints
    #[default]
    Extended,
}

impl ApiVariant {
    pub fn default_base_url(self) -> Option<&'static str> {
        match self {
            ApiVariant::Basic => None,
            ApiVariant::Extended => Some(EXTENDED_DEFAULT_BASE_URL),
        }
    }

    pub fn is_extended(self) -> bool {
        self == ApiVariant::Extended
    }
}

impl fmt::Display for ApiVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiVariant::Basic => f.write_str("basic"),
            ApiVariant::Extended => f.write_str("extended"),
        }
    }
}

impl FromStr for ApiVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(ApiVariant::Basic),
            "extended" => Ok(ApiVariant::Extended),
            _ => Err(UnknownVariant {
                kind: "api variant",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: Option<String>,
    pub variant: ApiVariant,
    pub notification_ttl_ms: u64,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: None,
            variant: ApiVariant::default(),
            notification_ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    pub fn resolved_base_url(&self) -> Option<String> {
        self.api_base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .or_else(|| self.variant.default_base_url().map(str::to_string))
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_url: Option<String>,
    variant: Option<ApiVariant>,
    notification_ttl_ms: Option<u64>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then the settings file at `path`, then environment.
pub fn load_settings(path: &Path) -> Settings {
    let mut settings = Settings::default();
    apply_file(&mut settings, path);
    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

pub fn apply_file(settings: &mut Settings, path: &Path) {
    let Ok(raw) = fs::read_to_string(path) else {
        return;
    };
    match toml::from_str::<FileSettings>(&raw) {
        Ok(file_cfg) => merge_file(settings, file_cfg),
        Err(err) => warn!(path = %path.display(), "ignoring unreadable settings file: {err}"),
    }
}

fn merge_file(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.api_url {
        settings.api_base_url = Some(v);
    }
    if let Some(v) = file_cfg.variant {
        settings.variant = v;
    }
    if let Some(v) = file_cfg.notification_ttl_ms {
        settings.notification_ttl_ms = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = Some(v);
    }
}

// the APP__ spelling wins over the short one
pub fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("CATALOG_API_URL") {
        settings.api_base_url = Some(v);
    }
    if let Some(v) = lookup("APP__API_URL") {
        settings.api_base_url = Some(v);
    }

    for key in ["CATALOG_VARIANT", "APP__VARIANT"] {
        if let Some(v) = lookup(key) {
            match v.parse() {
                Ok(variant) => settings.variant = variant,
                Err(err) => warn!(key, "ignoring {err}"),
            }
        }
    }

    if let Some(v) = lookup("APP__NOTIFICATION_TTL_MS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.notification_ttl_ms = parsed;
        }
    }
    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_secs = Some(parsed);
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
