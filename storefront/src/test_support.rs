//! Test utilities for the storefront crate.
//!
//! Shared by unit tests in `src/` and integration tests in `tests/`. Compiled
//! only for tests or with the `test-support` feature.

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::CatalogQuery;
use crate::domain::{CatalogSnapshot, MenuCategory, MenuEntry, MenuEntryId};

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock(pub DateTime<Utc>);

impl FixtureClock {
    /// 2024-01-15 18:00 UTC, the evening the fixture order history was taken.
    #[must_use]
    pub fn dinner_service() -> Self {
        Self(
            Utc.with_ymd_and_hms(2024, 1, 15, 18, 0, 0)
                .single()
                .unwrap_or_default(),
        )
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Catalogue query serving one fixed, fully loaded snapshot.
#[derive(Debug, Clone)]
pub struct StaticCatalog(pub CatalogSnapshot);

impl StaticCatalog {
    /// A loaded single-category menu with the given `(id, name, price)` entries.
    #[must_use]
    pub fn priced(entries: &[(i64, &str, u64)]) -> Self {
        let items = entries
            .iter()
            .map(|&(id, name, price)| MenuEntry {
                id: MenuEntryId::new(id),
                name: name.to_owned(),
                description: String::new(),
                price,
                image_ref: None,
            })
            .collect();
        Self(CatalogSnapshot {
            restaurant_name: "Test Kitchen".to_owned(),
            categories: vec![MenuCategory {
                name: "Menu".to_owned(),
                items,
            }],
            loading: false,
            loaded: true,
            load_failed: false,
        })
    }
}

#[async_trait]
impl CatalogQuery for StaticCatalog {
    async fn snapshot(&self) -> CatalogSnapshot {
        self.0.clone()
    }
}
