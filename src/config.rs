// Storefront Core - Bookstore catalog, inquiry and quiz client
// Copyright (C) 2025 Storefront Core contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Application settings
//!
//! Loaded from a TOML file; every field has a default, so an empty file (or no
//! file at all) gives a working setup against a local backend.
//!
//! # Search order
//! 1. `--config` / `STOREFRONT_CONFIG`
//! 2. `./storefront.toml`
//! 3. `<config dir>/storefront/config.toml`

use crate::api::client::{ClientConfig, DEFAULT_BASE_URL};
use crate::catalog::query::DEFAULT_PAGE_SIZE;
use crate::error::{Result, StorefrontError};
use crate::inquiry::LIBRARY_PHONE;
use crate::storage::Database;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "storefront.toml";

/// Main configuration from TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub whatsapp: WhatsAppSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Backend connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// API base URL including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Overrides the default `storefront-core/<version>` user agent.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Session storage location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite file for the session; the platform data dir when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageSettings {
    pub fn resolve_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(Database::get_default_path)
    }
}

/// Catalog listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Inquiry links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatsAppSettings {
    /// Number inquiries are sent to.
    #[serde(default = "default_library_phone")]
    pub library_phone: String,

    /// Delay before the web fallback on iOS, in milliseconds.
    #[serde(default = "default_fallback_delay_ms")]
    pub app_fallback_delay_ms: u64,
}

impl Default for WhatsAppSettings {
    fn default() -> Self {
        Self {
            library_phone: default_library_phone(),
            app_fallback_delay_ms: default_fallback_delay_ms(),
        }
    }
}

fn default_library_phone() -> String {
    LIBRARY_PHONE.to_string()
}

fn default_fallback_delay_ms() -> u64 {
    2000
}

impl WhatsAppSettings {
    pub fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.app_fallback_delay_ms)
    }
}

/// Log output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "storefront_core=info".to_string()
}

impl Settings {
    /// Load configuration from file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StorefrontError::ConfigurationError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Explicit path if given, else the first default location that exists,
    /// else built-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::find_config_file() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using config file");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Find config file in default locations.
    pub fn find_config_file() -> Option<PathBuf> {
        let mut candidates = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(path) = Self::user_config_path() {
            candidates.push(path);
        }

        candidates.into_iter().find(|p| p.exists())
    }

    /// `<config dir>/storefront/config.toml`
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("storefront").join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url).map_err(|e| {
            StorefrontError::ConfigurationError(format!("Invalid api.base_url '{}': {}", self.api.base_url, e))
        })?;
        if self.api.timeout_secs == 0 {
            return Err(StorefrontError::ConfigurationError(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.catalog.page_size == 0 {
            return Err(StorefrontError::ConfigurationError(
                "catalog.page_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// HTTP client configuration from the `[api]` section
    pub fn to_client_config(&self) -> ClientConfig {
        let mut builder = ClientConfig::builder()
            .base_url(self.api.base_url.clone())
            .timeout(Duration::from_secs(self.api.timeout_secs));
        if let Some(ua) = &self.api.user_agent {
            builder = builder.user_agent(ua.clone());
        }
        builder.build()
    }

    /// Generate default config file content.
    pub fn generate_default() -> String {
        r#"# storefront configuration

[api]
base_url = "http://localhost:5035/api"
timeout_secs = 30
# user_agent = "storefront-core"

[storage]
# Session database (token and logged-in user)
# path = "/home/me/.local/share/storefront/storage.db"

[catalog]
page_size = 12

[whatsapp]
library_phone = "+962785462983"
# Delay before opening wa.me after the app link on iOS
app_fallback_delay_ms = 2000

[logging]
# Used when RUST_LOG is not set
level = "storefront_core=info"
"#
        .to_string()
    }

    /// Write the default config to `path`, refusing to overwrite unless `force`
    pub fn write_default(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            return Err(StorefrontError::ConfigurationError(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::generate_default())?;
        Ok(())
    }
}
