//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`MenuSource`, `PreferencesStore`, `OrderHistory`) are
//! implemented by outbound adapters. Driving ports (`CatalogQuery`,
//! `PreferencesQuery`, `PreferencesCommand`, `AdminOrdersQuery`, `AuthGate`)
//! are what the HTTP handlers call.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_orders_query;
mod auth_gate;
mod catalog_query;
mod menu_source;
mod order_history;
mod preferences_command;
mod preferences_query;
mod preferences_store;

#[cfg(test)]
pub use admin_orders_query::MockAdminOrdersQuery;
pub use admin_orders_query::{AdminOrdersQuery, Dashboard, FixtureAdminOrdersQuery};
#[cfg(test)]
pub use auth_gate::MockAuthGate;
pub use auth_gate::{ADMIN_DISPLAY_NAME, ADMIN_EMAIL, ADMIN_PASSWORD, AuthGate, FixtureAuthGate};
#[cfg(test)]
pub use catalog_query::MockCatalogQuery;
pub use catalog_query::{CatalogQuery, FixtureCatalogQuery};
#[cfg(test)]
pub use menu_source::MockMenuSource;
pub use menu_source::{FetchError, FixtureMenuSource, MenuSource};
#[cfg(test)]
pub use order_history::MockOrderHistory;
pub use order_history::{FixtureOrderHistory, OrderHistory, OrderHistoryError};
#[cfg(test)]
pub use preferences_command::MockPreferencesCommand;
pub use preferences_command::{FixturePreferencesCommand, PreferencesCommand};
#[cfg(test)]
pub use preferences_query::MockPreferencesQuery;
pub use preferences_query::{FixturePreferencesQuery, PreferencesQuery};
#[cfg(test)]
pub use preferences_store::MockPreferencesStore;
pub use preferences_store::{FixturePreferencesStore, PreferencesStore, PreferencesStoreError};
