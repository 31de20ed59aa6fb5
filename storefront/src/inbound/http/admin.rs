//! Admin dashboard handlers.
//!
//! ```text
//! GET /api/v1/admin/orders
//! GET /api/v1/admin/orders/{id}
//! ```

use actix_web::{HttpResponse, get, web};

use crate::domain::ports::Dashboard;
use crate::domain::{Error, OrderId, PastOrder};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

fn require_admin(session: &SessionContext) -> Result<(), Error> {
    if session.record().router.is_admin() {
        Ok(())
    } else {
        Err(Error::forbidden("administrator access required"))
    }
}

/// Dashboard summary and the full order history.
#[utoipa::path(
    get,
    path = "/api/v1/admin/orders",
    responses(
        (status = 200, description = "Dashboard", body = Dashboard),
        (status = 403, description = "Not an administrator", body = Error),
        (status = 503, description = "Order history unavailable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "getDashboard"
)]
#[get("/admin/orders")]
pub async fn list_orders(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    require_admin(&session)?;
    let dashboard = state.orders.dashboard().await?;
    Ok(HttpResponse::Ok().json(dashboard))
}

/// One past order.
#[utoipa::path(
    get,
    path = "/api/v1/admin/orders/{id}",
    params(("id" = u32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order detail", body = PastOrder),
        (status = 403, description = "Not an administrator", body = Error),
        (status = 404, description = "Unknown order", body = Error)
    ),
    tags = ["admin"],
    operation_id = "getOrder"
)]
#[get("/admin/orders/{id}")]
pub async fn get_order(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<u32>,
) -> ApiResult<HttpResponse> {
    require_admin(&session)?;
    let order = state.orders.order(OrderId::new(path.into_inner())).await?;
    Ok(HttpResponse::Ok().json(order))
}
