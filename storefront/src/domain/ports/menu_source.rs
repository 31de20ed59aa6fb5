//! Driven port for the external menu service.
//!
//! The source returns the restaurant's display name and its menu as ordered
//! categories. Adapters own transport and decoding; the domain only sees
//! [`MenuCategory`] trees or a [`FetchError`].

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{MenuCategory, MenuEntry, MenuEntryId, RestaurantId};

define_port_error! {
    /// Errors surfaced while fetching catalogue data.
    pub enum FetchError {
        /// The service could not be reached.
        Transport { message: String } => "menu service transport failed: {message}",
        /// The request exceeded its timeout.
        Timeout { message: String } => "menu service timed out: {message}",
        /// The service answered with a non-success status.
        Status { status: u16, message: String } =>
            "menu service returned status {status}: {message}",
        /// The payload did not match the expected shape.
        Decode { message: String } => "menu service payload invalid: {message}",
    }
}

/// Port for reading restaurant data from the menu service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuSource: Send + Sync {
    /// Fetch the restaurant's display name.
    async fn restaurant_name(&self, restaurant: &RestaurantId) -> Result<String, FetchError>;

    /// Fetch the menu as ordered categories.
    async fn menu(&self, restaurant: &RestaurantId) -> Result<Vec<MenuCategory>, FetchError>;
}

/// Static menu used for local development and handler tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMenuSource;

impl FixtureMenuSource {
    /// Display name returned for every restaurant id.
    pub const RESTAURANT_NAME: &'static str = "Trattoria Fixture";

    /// The categories served by [`FixtureMenuSource::menu`].
    pub fn categories() -> Vec<MenuCategory> {
        fn entry(id: i64, name: &str, description: &str, price: u64) -> MenuEntry {
            MenuEntry {
                id: MenuEntryId::new(id),
                name: name.to_owned(),
                description: description.to_owned(),
                price,
                image_ref: None,
            }
        }

        vec![
            MenuCategory {
                name: "Predjela".to_owned(),
                items: vec![entry(1, "Bruschetta", "Toasted bread, tomato, basil", 450)],
            },
            MenuCategory {
                name: "Glavna jela".to_owned(),
                items: vec![
                    entry(2, "Pasta Carbonara", "Guanciale, egg yolk, pecorino", 1200),
                    entry(3, "Rižoto sa gljivama", "Arborio rice, porcini", 1100),
                ],
            },
            MenuCategory {
                name: "Deserti".to_owned(),
                items: vec![
                    entry(4, "Tiramisu", "Mascarpone, espresso, cocoa", 650),
                    entry(5, "Panna Cotta", "Vanilla cream, berry coulis", 550),
                ],
            },
        ]
    }
}

#[async_trait]
impl MenuSource for FixtureMenuSource {
    async fn restaurant_name(&self, _restaurant: &RestaurantId) -> Result<String, FetchError> {
        Ok(Self::RESTAURANT_NAME.to_owned())
    }

    async fn menu(&self, _restaurant: &RestaurantId) -> Result<Vec<MenuCategory>, FetchError> {
        Ok(Self::categories())
    }
}
