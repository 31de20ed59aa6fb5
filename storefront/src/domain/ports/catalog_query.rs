//! Driving port for reading the loaded catalogue.
//!
//! HTTP handlers depend on this trait instead of the concrete catalogue
//! service so they can be tested against a fixed snapshot.

use async_trait::async_trait;

use super::FixtureMenuSource;
use crate::domain::CatalogSnapshot;

/// Read access to the current catalogue state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    /// Copy of the current catalogue state.
    async fn snapshot(&self) -> CatalogSnapshot;
}

/// Fully loaded snapshot built from [`FixtureMenuSource`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCatalogQuery;

#[async_trait]
impl CatalogQuery for FixtureCatalogQuery {
    async fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            restaurant_name: FixtureMenuSource::RESTAURANT_NAME.to_owned(),
            categories: FixtureMenuSource::categories(),
            loading: false,
            loaded: true,
            load_failed: false,
        }
    }
}
