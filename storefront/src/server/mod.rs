//! Server construction and middleware wiring.
//!
//! [`build_app`] assembles the full application (session cookie, extractor
//! error handlers, trace middleware and every route) so the binary and the
//! integration tests serve the same stack.

mod config;

pub use config::ServerConfig;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::error::{
    json_error_handler, path_error_handler, query_error_handler,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{admin, auth, cart, preferences, storefront as page};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Shared state and session settings for one application instance.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    /// Signing and encryption key for the session cookie.
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Build the storefront application over `deps`.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(page::get_storefront)
        .service(page::toggle_category)
        .service(cart::get_cart)
        .service(cart::add_item)
        .service(cart::set_quantity)
        .service(cart::remove_item)
        .service(cart::open_panel)
        .service(cart::close_panel)
        .service(auth::open_auth_modal)
        .service(auth::close_auth_modal)
        .service(auth::login)
        .service(auth::register)
        .service(auth::logout)
        .service(auth::open_admin_panel)
        .service(auth::back_to_storefront)
        .service(auth::place_order)
        .service(admin::list_orders)
        .service(admin::get_order)
        .service(preferences::get_preferences)
        .service(preferences::toggle_theme);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server over the given handler state.
///
/// Readiness is not touched here; the caller marks the server ready once the
/// first catalogue load has settled.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}

#[cfg(test)]
mod tests {
    //! End-to-end wiring through the full middleware stack.
    use std::sync::Arc;

    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};
    use crate::domain::TRACE_ID_HEADER;
    use crate::domain::ports::{
        FixtureAdminOrdersQuery, FixtureAuthGate, FixtureCatalogQuery, FixturePreferencesCommand,
        FixturePreferencesQuery,
    };
    use crate::inbound::http::state::HttpStatePorts;
    use url::Url;

    #[fixture]
    fn deps() -> AppDependencies {
        let ports = HttpStatePorts {
            auth: Arc::new(FixtureAuthGate),
            catalog: Arc::new(FixtureCatalogQuery),
            preferences_query: Arc::new(FixturePreferencesQuery),
            preferences: Arc::new(FixturePreferencesCommand),
            orders: Arc::new(FixtureAdminOrdersQuery),
            asset_base_url: Url::parse("http://assets.test").expect("url"),
        };
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(HttpState::from(ports)),
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn cart_survives_across_requests(deps: AppDependencies) {
        let app = test::init_service(build_app(deps)).await;

        let add = test::TestRequest::post()
            .uri("/api/v1/cart/items")
            .set_json(json!({ "entryId": 4 }))
            .to_request();
        let res = test::call_service(&app, add).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
        let cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .map(|cookie| cookie.into_owned())
            .expect("session cookie");
        assert!(cookie.http_only().unwrap_or(false));

        let get = test::TestRequest::get()
            .uri("/api/v1/cart")
            .cookie(cookie)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, get).await;
        assert_eq!(body["total"], 650);
        assert_eq!(body["itemCount"], 1);
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_payloads_are_rejected_as_json(deps: AppDependencies) {
        let app = test::init_service(build_app(deps)).await;

        let req = test::TestRequest::put()
            .uri("/api/v1/cart/items/pasta")
            .set_json(json!({ "quantity": 1 }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");

        let req = test::TestRequest::post()
            .uri("/api/v1/cart/items")
            .set_json(json!({ "entryId": "two" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
    }

    #[rstest]
    #[actix_web::test]
    async fn probes_are_served_outside_the_api_scope(deps: AppDependencies) {
        let health = deps.health_state.clone();
        let app = test::init_service(build_app(deps)).await;

        let probe = || test::TestRequest::get().uri("/health/ready").to_request();
        let res = test::call_service(&app, probe()).await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

        health.mark_ready();
        let res = test::call_service(&app, probe()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
