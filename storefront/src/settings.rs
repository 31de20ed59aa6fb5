//! Runtime settings loaded via OrthoConfig.
//!
//! Every value can come from `STOREFRONT_*` environment variables, the
//! command line or a configuration file. Accessors apply defaults and
//! validate.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::{CatalogValidationError, RestaurantId};

const DEFAULT_MENU_BASE_URL: &str = "http://192.168.1.164:5000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PREFERENCES_PATH: &str = "data/preferences.json";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised when a configured value is unusable.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("STOREFRONT_RESTAURANT_ID must be set")]
    MissingRestaurantId,
    #[error("invalid restaurant id: {0}")]
    InvalidRestaurantId(#[from] CatalogValidationError),
    #[error("invalid {field} '{value}': {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Storefront process configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STOREFRONT")]
pub struct StorefrontSettings {
    /// Restaurant whose menu is served.
    pub restaurant_id: Option<String>,
    /// Base URL of the menu service.
    pub menu_base_url: Option<String>,
    /// Base URL image references are resolved against. Defaults to the menu
    /// service URL.
    pub asset_base_url: Option<String>,
    /// Timeout applied to each menu service request.
    pub request_timeout_secs: Option<u64>,
    /// JSON file holding device preferences.
    pub preferences_path: Option<PathBuf>,
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|source| SettingsError::InvalidUrl {
        field,
        value: value.to_owned(),
        source,
    })
}

impl StorefrontSettings {
    pub fn restaurant_id(&self) -> Result<RestaurantId, SettingsError> {
        let raw = self
            .restaurant_id
            .as_deref()
            .ok_or(SettingsError::MissingRestaurantId)?;
        Ok(RestaurantId::new(raw)?)
    }

    pub fn menu_base_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "menu_base_url",
            self.menu_base_url.as_deref().unwrap_or(DEFAULT_MENU_BASE_URL),
        )
    }

    pub fn asset_base_url(&self) -> Result<Url, SettingsError> {
        match self.asset_base_url.as_deref() {
            Some(raw) => parse_url("asset_base_url", raw),
            None => self.menu_base_url(),
        }
    }

    pub fn request_timeout(&self) -> Result<Duration, SettingsError> {
        match self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
        {
            0 => Err(SettingsError::ZeroTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.preferences_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PREFERENCES_PATH))
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                source,
            })
    }
}
