//! Storefront page and category disclosure handlers.
//!
//! ```text
//! GET  /api/v1/storefront?table=12
//! POST /api/v1/categories/{name}/toggle
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};
use utoipa::IntoParams;

use crate::domain::{Action, Error, Outcome, TableNumber};
use crate::inbound::http::ApiResult;
use crate::inbound::http::device::Device;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::StorefrontView;

/// Apply one action to the visitor's session, persist it and render the result.
///
/// The catalogue snapshot is read once so the cart is priced and rendered
/// against the same menu.
pub(crate) async fn dispatch(
    state: &HttpState,
    session: &SessionContext,
    action: Action,
) -> ApiResult<(Outcome, StorefrontView)> {
    let snapshot = state.catalog.snapshot().await;
    let mut current = session.storefront(&snapshot);
    let outcome = current.apply(action, state.auth.as_ref())?;
    session.persist(&current)?;
    let view = StorefrontView::render(&snapshot, &current, &state.asset_base_url);
    Ok((outcome, view))
}

/// Query string accepted by the storefront page.
#[derive(Debug, Deserialize, IntoParams)]
pub struct StorefrontQuery {
    /// Table number encoded in the QR code the visitor scanned.
    #[param(example = "12")]
    pub table: Option<String>,
}

fn parse_table(raw: &str) -> Result<TableNumber, Error> {
    TableNumber::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "table",
            "value": raw,
        }))
    })
}

/// Render the storefront.
///
/// A `table` parameter is remembered as the device's table number once the
/// catalogue has loaded.
#[utoipa::path(
    get,
    path = "/api/v1/storefront",
    params(StorefrontQuery),
    responses(
        (status = 200, description = "Storefront view", body = StorefrontView),
        (status = 400, description = "Invalid table number", body = Error)
    ),
    tags = ["storefront"],
    operation_id = "getStorefront"
)]
#[get("/storefront")]
pub async fn get_storefront(
    state: web::Data<HttpState>,
    session: SessionContext,
    device: Device,
    query: web::Query<StorefrontQuery>,
) -> ApiResult<HttpResponse> {
    let table = query.table.as_deref().map(parse_table).transpose()?;
    let snapshot = state.catalog.snapshot().await;

    if let Some(table) = table {
        if snapshot.loaded {
            if let Err(error) = state.preferences.record_table(device.id(), &table).await {
                warn!(%error, table = table.as_ref(), "failed to record table number");
            }
        } else {
            debug!(table = table.as_ref(), "catalogue not loaded; table number not recorded");
        }
    }

    let view = StorefrontView::render(
        &snapshot,
        &session.storefront(&snapshot),
        &state.asset_base_url,
    );
    let mut response = HttpResponse::Ok();
    device.remember(&mut response);
    Ok(response.json(view))
}

/// Expand or collapse a menu category.
#[utoipa::path(
    post,
    path = "/api/v1/categories/{name}/toggle",
    params(("name" = String, Path, description = "Category name")),
    responses(
        (status = 200, description = "Updated storefront view", body = StorefrontView),
        (status = 404, description = "Unknown category", body = Error)
    ),
    tags = ["storefront"],
    operation_id = "toggleCategory"
)]
#[post("/categories/{name}/toggle")]
pub async fn toggle_category(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let name = path.into_inner();
    let snapshot = state.catalog.snapshot().await;
    if !snapshot.has_category(&name) {
        return Err(Error::not_found(format!("category {name} not found"))
            .with_details(json!({ "category": name })));
    }
    let (_, view) = dispatch(&state, &session, Action::ToggleCategory(name)).await?;
    Ok(HttpResponse::Ok().json(view))
}
