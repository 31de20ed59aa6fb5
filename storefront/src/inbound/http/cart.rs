//! Cart handlers.
//!
//! ```text
//! GET    /api/v1/cart
//! POST   /api/v1/cart/items        {"entryId": 2}
//! PUT    /api/v1/cart/items/{id}   {"quantity": 3}
//! DELETE /api/v1/cart/items/{id}
//! POST   /api/v1/cart/panel
//! DELETE /api/v1/cart/panel
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Action, Error, MenuEntryId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::storefront::dispatch;
use crate::inbound::http::views::{CartView, StorefrontView};

/// Request payload for adding one unit of a menu entry.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    #[schema(example = 2)]
    pub entry_id: i64,
}

/// Request payload for replacing a line's quantity.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetQuantityRequest {
    /// Zero removes the line; negative values are rejected.
    #[schema(example = 3)]
    pub quantity: i64,
}

/// Current cart contents.
#[utoipa::path(
    get,
    path = "/api/v1/cart",
    responses((status = 200, description = "Cart lines and totals", body = CartView)),
    tags = ["cart"],
    operation_id = "getCart"
)]
#[get("/cart")]
pub async fn get_cart(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    let snapshot = state.catalog.snapshot().await;
    HttpResponse::Ok().json(CartView::from(&session.storefront(&snapshot).cart))
}

/// Add one unit of a menu entry.
#[utoipa::path(
    post,
    path = "/api/v1/cart/items",
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "Updated storefront view", body = StorefrontView),
        (status = 404, description = "Entry not on the menu", body = Error)
    ),
    tags = ["cart"],
    operation_id = "addCartItem"
)]
#[post("/cart/items")]
pub async fn add_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AddItemRequest>,
) -> ApiResult<HttpResponse> {
    let id = MenuEntryId::new(payload.entry_id);
    let snapshot = state.catalog.snapshot().await;
    let entry = snapshot.find_entry(id).cloned().ok_or_else(|| {
        Error::not_found(format!("menu entry {id} not found"))
            .with_details(json!({ "entryId": id.get() }))
    })?;
    let (_, view) = dispatch(&state, &session, Action::AddToCart(entry)).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Replace the quantity of a cart line.
#[utoipa::path(
    put,
    path = "/api/v1/cart/items/{id}",
    params(("id" = i64, Path, description = "Menu entry id")),
    request_body = SetQuantityRequest,
    responses(
        (status = 200, description = "Updated storefront view", body = StorefrontView),
        (status = 400, description = "Negative or oversized quantity", body = Error)
    ),
    tags = ["cart"],
    operation_id = "setCartItemQuantity"
)]
#[put("/cart/items/{id}")]
pub async fn set_quantity(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<SetQuantityRequest>,
) -> ApiResult<HttpResponse> {
    let action = Action::SetQuantity {
        id: MenuEntryId::new(path.into_inner()),
        quantity: payload.quantity,
    };
    let (_, view) = dispatch(&state, &session, action).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Remove a cart line. Removing an absent line is not an error.
#[utoipa::path(
    delete,
    path = "/api/v1/cart/items/{id}",
    params(("id" = i64, Path, description = "Menu entry id")),
    responses((status = 200, description = "Updated storefront view", body = StorefrontView)),
    tags = ["cart"],
    operation_id = "removeCartItem"
)]
#[delete("/cart/items/{id}")]
pub async fn remove_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let action = Action::RemoveFromCart(MenuEntryId::new(path.into_inner()));
    let (_, view) = dispatch(&state, &session, action).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[utoipa::path(
    post,
    path = "/api/v1/cart/panel",
    responses((status = 200, description = "Updated storefront view", body = StorefrontView)),
    tags = ["cart"],
    operation_id = "openCartPanel"
)]
#[post("/cart/panel")]
pub async fn open_panel(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let (_, view) = dispatch(&state, &session, Action::OpenCart).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[utoipa::path(
    delete,
    path = "/api/v1/cart/panel",
    responses((status = 200, description = "Updated storefront view", body = StorefrontView)),
    tags = ["cart"],
    operation_id = "closeCartPanel"
)]
#[delete("/cart/panel")]
pub async fn close_panel(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let (_, view) = dispatch(&state, &session, Action::CloseCart).await?;
    Ok(HttpResponse::Ok().json(view))
}
