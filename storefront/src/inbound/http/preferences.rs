//! Device preferences handlers.
//!
//! ```text
//! GET  /api/v1/preferences
//! POST /api/v1/preferences/theme/toggle
//! ```
//!
//! Both endpoints act on the device named by the `storefront_device` cookie
//! and issue one when it is missing.

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{Error, Preferences};
use crate::inbound::http::ApiResult;
use crate::inbound::http::device::Device;
use crate::inbound::http::state::HttpState;

/// Current theme and table number.
#[utoipa::path(
    get,
    path = "/api/v1/preferences",
    responses(
        (
            status = 200,
            description = "Device preferences",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = Preferences
        )
    ),
    tags = ["preferences"],
    operation_id = "getPreferences"
)]
#[get("/preferences")]
pub async fn get_preferences(state: web::Data<HttpState>, device: Device) -> HttpResponse {
    let preferences = state.preferences_query.preferences(device.id()).await;
    let mut response = HttpResponse::Ok();
    response.insert_header(("Cache-Control", "no-cache"));
    device.remember(&mut response);
    response.json(preferences)
}

/// Flip between the light and dark themes.
#[utoipa::path(
    post,
    path = "/api/v1/preferences/theme/toggle",
    responses(
        (status = 200, description = "Updated preferences", body = Preferences),
        (status = 503, description = "Preferences store unavailable", body = Error)
    ),
    tags = ["preferences"],
    operation_id = "toggleTheme"
)]
#[post("/preferences/theme/toggle")]
pub async fn toggle_theme(
    state: web::Data<HttpState>,
    device: Device,
) -> ApiResult<HttpResponse> {
    let preferences = state.preferences.toggle_theme(device.id()).await?;
    let mut response = HttpResponse::Ok();
    device.remember(&mut response);
    Ok(response.json(preferences))
}

#[cfg(test)]
mod tests {
    //! Handler coverage for device preferences.
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{FixturePreferencesStore, MockPreferencesCommand};
    use crate::domain::{DeviceId, PreferencesService, Theme};
    use crate::inbound::http::device::DEVICE_COOKIE;
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::{Reply, fixture_ports, run_requests};
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;

    async fn call(ports: HttpStatePorts, requests: Vec<test::TestRequest>) -> Vec<Reply> {
        run_requests(
            ports,
            |cfg| {
                cfg.service(get_preferences).service(toggle_theme);
            },
            requests,
        )
        .await
    }

    fn store_ports() -> HttpStatePorts {
        let store = Arc::new(FixturePreferencesStore::default());
        let service = Arc::new(PreferencesService::new(store));
        let mut ports = fixture_ports();
        ports.preferences_query = service.clone();
        ports.preferences = service;
        ports
    }

    #[rstest]
    #[actix_web::test]
    async fn toggling_twice_returns_to_light() {
        let toggle = || test::TestRequest::post().uri("/preferences/theme/toggle");
        let replies = call(
            store_ports(),
            vec![
                toggle(),
                test::TestRequest::get().uri("/preferences"),
                toggle(),
            ],
        )
        .await;

        let first: Preferences = replies[0].json();
        let read: Preferences = replies[1].json();
        let second: Preferences = replies[2].json();
        assert_eq!(first.theme, Theme::Dark);
        assert_eq!(read.theme, Theme::Dark);
        assert_eq!(second.theme, Theme::Light);
    }

    #[rstest]
    #[actix_web::test]
    async fn visitors_keep_their_own_theme() {
        let ports = store_ports();
        let toggle = || test::TestRequest::post().uri("/preferences/theme/toggle");
        let read = || test::TestRequest::get().uri("/preferences");

        let first = call(ports.clone(), vec![toggle(), read()]).await;
        let second = call(ports, vec![read()]).await;

        assert_eq!(first[1].json::<Preferences>().theme, Theme::Dark);
        assert_eq!(second[0].json::<Preferences>().theme, Theme::Light);
    }

    #[rstest]
    #[actix_web::test]
    async fn first_visit_issues_the_device_cookie() {
        let replies = call(
            store_ports(),
            vec![
                test::TestRequest::get().uri("/preferences"),
                test::TestRequest::get().uri("/preferences"),
            ],
        )
        .await;
        assert!(replies[0].sets_cookie(DEVICE_COOKIE));
        assert!(!replies[1].sets_cookie(DEVICE_COOKIE));
    }

    #[rstest]
    #[actix_web::test]
    async fn unreadable_values_degrade_to_defaults() {
        let device = DeviceId::generate();
        let store = Arc::new(FixturePreferencesStore::with_values([
            (device.key("theme"), "sepia"),
            (device.key("table_number"), "!!"),
        ]));
        let mut ports = fixture_ports();
        ports.preferences_query = Arc::new(PreferencesService::new(store));

        let replies = call(
            ports,
            vec![
                test::TestRequest::get()
                    .uri("/preferences")
                    .cookie(Cookie::new(DEVICE_COOKIE, device.to_string())),
            ],
        )
        .await;
        assert_eq!(replies[0].status, StatusCode::OK);
        let preferences: Preferences = replies[0].json();
        assert_eq!(preferences, Preferences::default());
    }

    #[rstest]
    #[actix_web::test]
    async fn store_failures_surface_as_unavailable() {
        let mut command = MockPreferencesCommand::new();
        command
            .expect_toggle_theme()
            .times(1)
            .returning(|_| Err(Error::service_unavailable("preferences unavailable")));
        let mut ports = fixture_ports();
        ports.preferences = Arc::new(command);

        let replies = call(
            ports,
            vec![test::TestRequest::post().uri("/preferences/theme/toggle")],
        )
        .await;
        assert_eq!(replies[0].status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
