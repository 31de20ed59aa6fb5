//! Driving port for changing device preferences.

use async_trait::async_trait;

use crate::domain::{DeviceId, Error, Preferences, TableNumber};

/// Use-case port for preference mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreferencesCommand: Send + Sync {
    /// Flip `device` between light and dark and return its updated preferences.
    async fn toggle_theme(&self, device: &DeviceId) -> Result<Preferences, Error>;

    /// Remember the table number from the storefront link for `device`.
    async fn record_table(
        &self,
        device: &DeviceId,
        table: &TableNumber,
    ) -> Result<Preferences, Error>;
}

/// Fixture command that computes results without storing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePreferencesCommand;

#[async_trait]
impl PreferencesCommand for FixturePreferencesCommand {
    async fn toggle_theme(&self, _device: &DeviceId) -> Result<Preferences, Error> {
        Ok(Preferences {
            theme: Preferences::default().theme.toggled(),
            table_number: None,
        })
    }

    async fn record_table(
        &self,
        _device: &DeviceId,
        table: &TableNumber,
    ) -> Result<Preferences, Error> {
        Ok(Preferences {
            table_number: Some(table.clone()),
            ..Preferences::default()
        })
    }
}
