//! Preferences service implementing the preference driving ports.
//!
//! Values live in a [`PreferencesStore`] as plain strings under keys scoped
//! by [`DeviceId::key`]. Reads degrade to defaults with a warning; writes
//! surface store failures as `service_unavailable`.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::ports::{
    PreferencesCommand, PreferencesQuery, PreferencesStore, PreferencesStoreError,
};
use crate::domain::{
    DeviceId, Error, Preferences, TABLE_NUMBER_KEY, THEME_KEY, TableNumber, Theme,
};

/// Preferences use-cases over a key-value store.
pub struct PreferencesService<S: ?Sized> {
    /// Serialises theme toggles so concurrent flips are never lost.
    toggle_lock: Mutex<()>,
    store: Arc<S>,
}

impl<S: ?Sized> PreferencesService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            toggle_lock: Mutex::new(()),
            store,
        }
    }
}

impl<S> PreferencesService<S>
where
    S: PreferencesStore + ?Sized,
{
    fn map_store_error(error: PreferencesStoreError) -> Error {
        Error::service_unavailable(format!("preferences unavailable: {error}"))
    }

    async fn load_theme(&self, device: &DeviceId) -> Theme {
        match self.store.get(&device.key(THEME_KEY)).await {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|error| {
                warn!(%error, %device, "ignoring stored theme");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(error) => {
                warn!(%error, %device, "theme unreadable; using default");
                Theme::default()
            }
        }
    }

    async fn load_table_number(&self, device: &DeviceId) -> Option<TableNumber> {
        match self.store.get(&device.key(TABLE_NUMBER_KEY)).await {
            Ok(Some(raw)) => TableNumber::new(&raw)
                .inspect_err(|error| warn!(%error, %device, "ignoring stored table number"))
                .ok(),
            Ok(None) => None,
            Err(error) => {
                warn!(%error, %device, "table number unreadable; ignoring");
                None
            }
        }
    }

    /// Current preferences of `device`, with defaults for anything missing
    /// or invalid.
    pub async fn load(&self, device: &DeviceId) -> Preferences {
        Preferences {
            theme: self.load_theme(device).await,
            table_number: self.load_table_number(device).await,
        }
    }
}

#[async_trait]
impl<S> PreferencesQuery for PreferencesService<S>
where
    S: PreferencesStore + ?Sized,
{
    async fn preferences(&self, device: &DeviceId) -> Preferences {
        self.load(device).await
    }
}

#[async_trait]
impl<S> PreferencesCommand for PreferencesService<S>
where
    S: PreferencesStore + ?Sized,
{
    async fn toggle_theme(&self, device: &DeviceId) -> Result<Preferences, Error> {
        let _guard = self.toggle_lock.lock().await;
        let mut preferences = self.load(device).await;
        preferences.theme = preferences.theme.toggled();
        self.store
            .set(&device.key(THEME_KEY), preferences.theme.as_str())
            .await
            .map_err(Self::map_store_error)?;
        debug!(%device, theme = %preferences.theme, "theme toggled");
        Ok(preferences)
    }

    async fn record_table(
        &self,
        device: &DeviceId,
        table: &TableNumber,
    ) -> Result<Preferences, Error> {
        self.store
            .set(&device.key(TABLE_NUMBER_KEY), table.as_ref())
            .await
            .map_err(Self::map_store_error)?;
        debug!(%device, table = table.as_ref(), "table number recorded");
        Ok(Preferences {
            theme: self.load_theme(device).await,
            table_number: Some(table.clone()),
        })
    }
}
