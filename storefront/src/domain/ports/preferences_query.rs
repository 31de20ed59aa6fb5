//! Driving port for reading device preferences.

use async_trait::async_trait;

use crate::domain::{DeviceId, Preferences};

/// Use-case port for reading preferences.
///
/// Reads never fail: unreadable values degrade to defaults.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreferencesQuery: Send + Sync {
    async fn preferences(&self, device: &DeviceId) -> Preferences;
}

/// Fixture query returning default preferences.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePreferencesQuery;

#[async_trait]
impl PreferencesQuery for FixturePreferencesQuery {
    async fn preferences(&self, _device: &DeviceId) -> Preferences {
        Preferences::default()
    }
}
