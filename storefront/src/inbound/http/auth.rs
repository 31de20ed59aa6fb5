//! Sign-in, view switching and checkout handlers.
//!
//! ```text
//! POST   /api/v1/auth/modal
//! DELETE /api/v1/auth/modal
//! POST   /api/v1/login
//! POST   /api/v1/register
//! POST   /api/v1/logout
//! POST   /api/v1/view/admin
//! POST   /api/v1/view/storefront
//! POST   /api/v1/orders
//! ```

use actix_web::{HttpResponse, delete, post, web};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Action, Error, LoginCredentials, Outcome, Registration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::storefront::dispatch;
use crate::inbound::http::views::{OrderResponse, OrderStatusView, StorefrontView};

/// Login form payload.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "admin@restoran.com")]
    pub email: String,
    #[schema(example = "admin123")]
    pub password: String,
}

/// Registration form payload.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "Ana")]
    pub name: String,
    #[schema(example = "ana@example.com")]
    pub email: String,
    pub password: String,
}

async fn respond(
    state: &HttpState,
    session: &SessionContext,
    action: Action,
) -> ApiResult<HttpResponse> {
    let (_, view) = dispatch(state, session, action).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/modal",
    responses((status = 200, description = "Updated storefront view", body = StorefrontView)),
    tags = ["auth"],
    operation_id = "openAuthModal"
)]
#[post("/auth/modal")]
pub async fn open_auth_modal(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    respond(&state, &session, Action::OpenAuthModal).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/auth/modal",
    responses((status = 200, description = "Updated storefront view", body = StorefrontView)),
    tags = ["auth"],
    operation_id = "closeAuthModal"
)]
#[delete("/auth/modal")]
pub async fn close_auth_modal(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    respond(&state, &session, Action::CloseAuthModal).await
}

/// Sign in. Every submission succeeds; only the built-in administrator
/// credentials yield the admin role.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses((status = 200, description = "Signed-in storefront view", body = StorefrontView)),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    respond(
        &state,
        &session,
        Action::Login(LoginCredentials::new(email, password)),
    )
    .await
}

/// Register and sign in as a customer.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses((status = 200, description = "Signed-in storefront view", body = StorefrontView)),
    tags = ["auth"],
    operation_id = "register"
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        name,
        email,
        password,
    } = payload.into_inner();
    respond(
        &state,
        &session,
        Action::Register(Registration::new(name, email, password)),
    )
    .await
}

/// Sign out. The cart is emptied and overlays close.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 200, description = "Anonymous storefront view", body = StorefrontView)),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    respond(&state, &session, Action::Logout).await
}

#[utoipa::path(
    post,
    path = "/api/v1/view/admin",
    responses(
        (status = 200, description = "Dashboard view", body = StorefrontView),
        (status = 403, description = "Not an administrator", body = Error)
    ),
    tags = ["view"],
    operation_id = "openAdminPanel"
)]
#[post("/view/admin")]
pub async fn open_admin_panel(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    respond(&state, &session, Action::OpenAdminPanel).await
}

#[utoipa::path(
    post,
    path = "/api/v1/view/storefront",
    responses((status = 200, description = "Storefront view", body = StorefrontView)),
    tags = ["view"],
    operation_id = "backToStorefront"
)]
#[post("/view/storefront")]
pub async fn back_to_storefront(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    respond(&state, &session, Action::BackToStorefront).await
}

/// Place the cart as an order. Nothing is submitted anywhere; anonymous
/// visitors are asked to sign in first.
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    responses(
        (status = 200, description = "Order outcome and updated view", body = OrderResponse),
        (status = 400, description = "Cart is empty", body = Error)
    ),
    tags = ["orders"],
    operation_id = "placeOrder"
)]
#[post("/orders")]
pub async fn place_order(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let (outcome, view) = dispatch(&state, &session, Action::PlaceOrder).await?;
    let response = match outcome {
        Outcome::OrderPlaced(confirmation) => {
            info!(
                total = confirmation.total,
                item_count = confirmation.item_count,
                "order placed"
            );
            OrderResponse {
                status: OrderStatusView::OrderPlaced,
                confirmation: Some(confirmation),
                view,
            }
        }
        Outcome::SignInRequired => OrderResponse {
            status: OrderStatusView::SignInRequired,
            confirmation: None,
            view,
        },
        Outcome::Updated => {
            return Err(Error::internal("order placement produced no outcome"));
        }
    };
    Ok(HttpResponse::Ok().json(response))
}
