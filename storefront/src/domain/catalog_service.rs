//! Catalogue loading service.
//!
//! Fetches the restaurant name and menu through a [`MenuSource`] and keeps the
//! latest results in memory for the storefront to read.
//!
//! Fetches are never retried or cancelled. When two menu fetches overlap, the
//! one that completes last overwrites the other. A failed fetch keeps the
//! previous data and only flips the failure flag.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::domain::ports::{CatalogQuery, FetchError, MenuSource};
use crate::domain::{CatalogSnapshot, MenuCategory, RestaurantId};

/// Which parts of the catalogue a refresh updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub name_updated: bool,
    pub menu_updated: bool,
}

#[derive(Debug, Default)]
struct CatalogState {
    snapshot: CatalogSnapshot,
    pending: usize,
}

/// Catalogue service for one restaurant.
pub struct CatalogService<S: ?Sized> {
    source: Arc<S>,
    restaurant: RestaurantId,
    state: RwLock<CatalogState>,
}

impl<S: ?Sized> CatalogService<S> {
    /// Create a service with an empty catalogue.
    pub fn new(source: Arc<S>, restaurant: RestaurantId) -> Self {
        Self {
            source,
            restaurant,
            state: RwLock::new(CatalogState::default()),
        }
    }

    pub fn restaurant(&self) -> &RestaurantId {
        &self.restaurant
    }
}

impl<S> CatalogService<S>
where
    S: MenuSource + ?Sized,
{
    /// Fetch the menu without touching the cached state.
    pub async fn load(&self) -> Result<Vec<MenuCategory>, FetchError> {
        self.source.menu(&self.restaurant).await
    }

    /// Fetch the restaurant name and menu concurrently and store the results.
    pub async fn refresh(&self) -> RefreshOutcome {
        let (name_updated, menu_updated) =
            futures_util::join!(self.refresh_name(), self.refresh_menu());
        RefreshOutcome {
            name_updated,
            menu_updated,
        }
    }

    async fn refresh_name(&self) -> bool {
        match self.source.restaurant_name(&self.restaurant).await {
            Ok(name) => {
                self.state.write().await.snapshot.restaurant_name = name;
                true
            }
            Err(error) => {
                warn!(
                    restaurant = %self.restaurant,
                    %error,
                    "restaurant name fetch failed; keeping previous name"
                );
                false
            }
        }
    }

    async fn refresh_menu(&self) -> bool {
        {
            let mut state = self.state.write().await;
            state.pending += 1;
            state.snapshot.loading = true;
        }

        let result = self.load().await;

        let mut state = self.state.write().await;
        state.pending = state.pending.saturating_sub(1);
        state.snapshot.loading = state.pending > 0;
        match result {
            Ok(categories) => {
                info!(
                    restaurant = %self.restaurant,
                    categories = categories.len(),
                    "menu loaded"
                );
                state.snapshot.categories = categories;
                state.snapshot.loaded = true;
                state.snapshot.load_failed = false;
                true
            }
            Err(error) => {
                warn!(
                    restaurant = %self.restaurant,
                    %error,
                    "menu fetch failed; keeping previous catalogue"
                );
                state.snapshot.load_failed = true;
                false
            }
        }
    }
}

#[async_trait]
impl<S> CatalogQuery for CatalogService<S>
where
    S: MenuSource + ?Sized,
{
    async fn snapshot(&self) -> CatalogSnapshot {
        self.state.read().await.snapshot.clone()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::domain::ports::{FixtureMenuSource, MockMenuSource};
    use crate::domain::{MenuEntry, MenuEntryId};
    use rstest::{fixture, rstest};
    use tokio::sync::{Mutex, oneshot};

    #[fixture]
    fn restaurant() -> RestaurantId {
        RestaurantId::new("7").expect("restaurant id")
    }

    fn category(name: &str) -> MenuCategory {
        MenuCategory {
            name: name.to_owned(),
            items: vec![MenuEntry {
                id: MenuEntryId::new(1),
                name: format!("{name} special"),
                description: String::new(),
                price: 500,
                image_ref: None,
            }],
        }
    }

    type MenuReply = Result<Vec<MenuCategory>, FetchError>;

    /// Source whose menu replies are released by the test.
    struct GatedSource {
        replies: Mutex<VecDeque<oneshot::Receiver<MenuReply>>>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MenuSource for GatedSource {
        async fn restaurant_name(&self, _restaurant: &RestaurantId) -> Result<String, FetchError> {
            Ok("Gated".to_owned())
        }

        async fn menu(&self, _restaurant: &RestaurantId) -> MenuReply {
            let receiver = self.replies.lock().await.pop_front();
            self.calls.fetch_add(1, Ordering::SeqCst);
            match receiver {
                Some(receiver) => receiver
                    .await
                    .unwrap_or_else(|_| Err(FetchError::transport("gate dropped"))),
                None => Err(FetchError::transport("no reply queued")),
            }
        }
    }

    #[rstest]
    #[tokio::test]
    async fn refresh_stores_name_and_menu(restaurant: RestaurantId) {
        let service = CatalogService::new(Arc::new(FixtureMenuSource), restaurant);

        let outcome = service.refresh().await;
        assert_eq!(
            outcome,
            RefreshOutcome {
                name_updated: true,
                menu_updated: true
            }
        );

        let snapshot = service.snapshot().await;
        assert_eq!(snapshot.restaurant_name, FixtureMenuSource::RESTAURANT_NAME);
        assert_eq!(snapshot.categories, FixtureMenuSource::categories());
        assert!(snapshot.loaded);
        assert!(!snapshot.loading);
        assert!(snapshot.settled());
    }

    #[rstest]
    #[tokio::test]
    async fn failed_refresh_keeps_previous_catalogue(restaurant: RestaurantId) {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut source = MockMenuSource::new();
        source
            .expect_restaurant_name()
            .returning(|_| Err(FetchError::timeout("slow")));
        let counter = Arc::clone(&calls);
        source.expect_menu().times(2).returning(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(vec![category("Pasta")])
            } else {
                Err(FetchError::decode("truncated body"))
            }
        });
        let service = CatalogService::new(Arc::new(source), restaurant);

        service.refresh().await;
        let outcome = service.refresh().await;
        assert!(!outcome.menu_updated);
        assert!(!outcome.name_updated);

        let snapshot = service.snapshot().await;
        assert_eq!(snapshot.categories, vec![category("Pasta")]);
        assert!(snapshot.restaurant_name.is_empty());
        assert!(snapshot.load_failed);
        assert!(snapshot.loaded);
        assert!(!snapshot.loading);
    }

    #[rstest]
    #[tokio::test]
    async fn first_failure_settles_without_data(restaurant: RestaurantId) {
        let mut source = MockMenuSource::new();
        source
            .expect_restaurant_name()
            .returning(|_| Ok("Resto".to_owned()));
        source
            .expect_menu()
            .returning(|_| Err(FetchError::status(500_u16, "boom")));
        let service = CatalogService::new(Arc::new(source), restaurant);

        service.refresh().await;

        let snapshot = service.snapshot().await;
        assert!(snapshot.categories.is_empty());
        assert!(snapshot.settled());
        assert!(!snapshot.loaded);
        assert_eq!(snapshot.restaurant_name, "Resto");
    }

    #[rstest]
    #[tokio::test]
    async fn overlapping_refreshes_keep_the_last_completion(restaurant: RestaurantId) {
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let source = Arc::new(GatedSource {
            replies: Mutex::new(VecDeque::from([first_rx, second_rx])),
            calls: AtomicUsize::new(0),
        });
        let service = Arc::new(CatalogService::new(Arc::clone(&source), restaurant));

        let first = tokio::spawn({
            let service = Arc::clone(&service);
            async move { service.refresh().await }
        });
        while source.calls.load(Ordering::SeqCst) < 1 {
            tokio::task::yield_now().await;
        }
        let second = tokio::spawn({
            let service = Arc::clone(&service);
            async move { service.refresh().await }
        });
        while source.calls.load(Ordering::SeqCst) < 2 {
            tokio::task::yield_now().await;
        }
        assert!(service.snapshot().await.loading);

        second_tx
            .send(Ok(vec![category("Second")]))
            .expect("second receiver alive");
        second.await.expect("second refresh");
        let midway = service.snapshot().await;
        assert_eq!(midway.categories, vec![category("Second")]);
        assert!(midway.loading, "first fetch is still outstanding");

        first_tx
            .send(Ok(vec![category("First")]))
            .expect("first receiver alive");
        first.await.expect("first refresh");
        let settled = service.snapshot().await;
        assert_eq!(settled.categories, vec![category("First")]);
        assert!(!settled.loading);
    }
}
