//! Driven port for the key-value preferences side channel.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::define_port_error;

define_port_error! {
    /// Errors raised by preferences store adapters.
    pub enum PreferencesStoreError {
        /// The backing storage could not be read or written.
        Io { message: String } => "preferences store i/o failed: {message}",
        /// Stored data could not be decoded.
        Corrupt { message: String } => "preferences store is corrupt: {message}",
    }
}

/// String key-value storage for device preferences.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreferencesStore: Send + Sync {
    /// Read a value; `None` when the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>, PreferencesStoreError>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), PreferencesStoreError>;
}

/// Process-local store used by tests and when no file path is configured.
#[derive(Debug, Default)]
pub struct FixturePreferencesStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl FixturePreferencesStore {
    /// Start from the given key-value pairs.
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: Mutex::new(
                values
                    .into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl PreferencesStore for FixturePreferencesStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PreferencesStoreError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PreferencesStoreError> {
        self.values
            .lock()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn fixture_store_round_trips_values() {
        let store = FixturePreferencesStore::with_values([("theme", "dark")]);
        assert_eq!(
            store.get("theme").await.expect("get"),
            Some("dark".to_owned())
        );

        store.set("theme", "light").await.expect("set");
        assert_eq!(
            store.get("theme").await.expect("get"),
            Some("light".to_owned())
        );
        assert_eq!(store.get("missing").await.expect("get"), None);
    }
}
