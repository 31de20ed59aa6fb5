//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use url::Url;

use crate::domain::ports::{
    AdminOrdersQuery, AuthGate, CatalogQuery, PreferencesCommand, PreferencesQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub auth: Arc<dyn AuthGate>,
    pub catalog: Arc<dyn CatalogQuery>,
    pub preferences_query: Arc<dyn PreferencesQuery>,
    pub preferences: Arc<dyn PreferencesCommand>,
    pub orders: Arc<dyn AdminOrdersQuery>,
    /// Base URL menu image references are resolved against.
    pub asset_base_url: Url,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthGate>,
    pub catalog: Arc<dyn CatalogQuery>,
    pub preferences_query: Arc<dyn PreferencesQuery>,
    pub preferences: Arc<dyn PreferencesCommand>,
    pub orders: Arc<dyn AdminOrdersQuery>,
    pub asset_base_url: Url,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use storefront::domain::ports::{
    ///     FixtureAdminOrdersQuery, FixtureAuthGate, FixtureCatalogQuery,
    ///     FixturePreferencesCommand, FixturePreferencesQuery,
    /// };
    /// use storefront::inbound::http::state::{HttpState, HttpStatePorts};
    /// use url::Url;
    ///
    /// let ports = HttpStatePorts {
    ///     auth: Arc::new(FixtureAuthGate),
    ///     catalog: Arc::new(FixtureCatalogQuery),
    ///     preferences_query: Arc::new(FixturePreferencesQuery),
    ///     preferences: Arc::new(FixturePreferencesCommand),
    ///     orders: Arc::new(FixtureAdminOrdersQuery),
    ///     asset_base_url: Url::parse("http://localhost:5000").unwrap(),
    /// };
    /// let state = HttpState::new(ports);
    /// let _catalog = state.catalog.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            auth,
            catalog,
            preferences_query,
            preferences,
            orders,
            asset_base_url,
        } = ports;
        Self {
            auth,
            catalog,
            preferences_query,
            preferences,
            orders,
            asset_base_url,
        }
    }
}
