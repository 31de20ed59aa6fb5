//! Test helpers for inbound HTTP components.

use std::collections::BTreeMap;
use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::web::{self, Bytes};
use actix_web::{App, test};
use serde::de::DeserializeOwned;
use url::Url;

use crate::domain::ports::{
    FixtureAdminOrdersQuery, FixtureAuthGate, FixtureCatalogQuery, FixturePreferencesCommand,
    FixturePreferencesQuery,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Asset base URL used by handler tests.
pub const TEST_ASSET_BASE: &str = "http://assets.test";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Port bundle backed entirely by fixtures.
pub fn fixture_ports() -> HttpStatePorts {
    HttpStatePorts {
        auth: Arc::new(FixtureAuthGate),
        catalog: Arc::new(FixtureCatalogQuery),
        preferences_query: Arc::new(FixturePreferencesQuery),
        preferences: Arc::new(FixturePreferencesCommand),
        orders: Arc::new(FixtureAdminOrdersQuery),
        asset_base_url: Url::parse(TEST_ASSET_BASE).expect("valid asset base"),
    }
}

/// Status, body and cookie names of one response in a [`run_requests`]
/// sequence.
pub struct Reply {
    pub status: StatusCode,
    pub body: Bytes,
    pub cookies: Vec<String>,
}

impl Reply {
    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("JSON response body")
    }

    /// Whether the response set a cookie called `name`.
    pub fn sets_cookie(&self, name: &str) -> bool {
        self.cookies.iter().any(|cookie| cookie == name)
    }
}

/// Send `requests` in order to an app built from `ports` and `routes`,
/// carrying every cookie set by one response into the next request.
pub async fn run_requests<F>(
    ports: HttpStatePorts,
    routes: F,
    requests: Vec<test::TestRequest>,
) -> Vec<Reply>
where
    F: FnOnce(&mut web::ServiceConfig),
{
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::from(ports)))
            .wrap(test_session_middleware())
            .configure(routes),
    )
    .await;

    let mut replies = Vec::with_capacity(requests.len());
    let mut jar: BTreeMap<String, Cookie<'static>> = BTreeMap::new();
    for request in requests {
        let request = jar
            .values()
            .cloned()
            .fold(request, |request, cookie| request.cookie(cookie));
        let response = test::call_service(&app, request.to_request()).await;
        let fresh: Vec<Cookie<'static>> = response
            .response()
            .cookies()
            .map(Cookie::into_owned)
            .collect();
        let cookies = fresh.iter().map(|c| c.name().to_owned()).collect();
        for cookie in fresh {
            jar.insert(cookie.name().to_owned(), cookie);
        }
        let status = response.status();
        let body = test::read_body(response).await;
        replies.push(Reply {
            status,
            body,
            cookies,
        });
    }
    replies
}
