//! Storefront entry-point: loads settings, wires adapters and serves HTTP.

use std::io;
use std::sync::Arc;

use actix_web::cookie::SameSite;
use actix_web::web;
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use storefront::domain::ports::{FixtureAuthGate, FixtureOrderHistory};
use storefront::domain::{AdminOrdersService, CatalogService, PreferencesService};
use storefront::inbound::http::health::HealthState;
use storefront::inbound::http::session_config::{BuildMode, session_settings_from_env};
use storefront::inbound::http::state::{HttpState, HttpStatePorts};
use storefront::outbound::menu_http::MenuHttpSource;
use storefront::outbound::preferences::JsonFilePreferencesStore;
use storefront::server::{ServerConfig, create_server};
use storefront::settings::StorefrontSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = StorefrontSettings::load().map_err(|e| io::Error::other(e.to_string()))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;

    let restaurant = settings.restaurant_id().map_err(io::Error::other)?;
    let source = MenuHttpSource::new(
        settings.menu_base_url().map_err(io::Error::other)?,
        settings.request_timeout().map_err(io::Error::other)?,
    )
    .map_err(io::Error::other)?;
    let catalog = Arc::new(CatalogService::new(Arc::new(source), restaurant));

    let store = JsonFilePreferencesStore::open(&settings.preferences_path())?;
    let preferences = Arc::new(PreferencesService::new(Arc::new(store)));
    let orders = AdminOrdersService::new(Arc::new(FixtureOrderHistory), Arc::new(DefaultClock));

    let http_state = web::Data::new(HttpState::new(HttpStatePorts {
        auth: Arc::new(FixtureAuthGate),
        catalog: catalog.clone(),
        preferences_query: preferences.clone(),
        preferences,
        orders: Arc::new(orders),
        asset_base_url: settings.asset_base_url().map_err(io::Error::other)?,
    }));
    let health_state = web::Data::new(HealthState::new());

    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        SameSite::Lax,
        settings.bind_addr().map_err(io::Error::other)?,
    );
    let server = create_server(health_state.clone(), http_state, config)?;

    let restaurant_id = catalog.restaurant().to_string();
    info!(restaurant = %restaurant_id, "loading catalogue");
    tokio::spawn(async move {
        let outcome = catalog.refresh().await;
        info!(
            restaurant = %restaurant_id,
            name_updated = outcome.name_updated,
            menu_updated = outcome.menu_updated,
            "initial catalogue load settled"
        );
        health_state.mark_ready();
    });

    server.await
}
