//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every storefront, cart, auth, admin, preferences and
//! health endpoint together with the payload schemas they reference. Debug
//! builds serve it through Swagger UI at `/docs`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::Dashboard;
use crate::domain::{
    CartLine, DashboardSummary, Error, ErrorCode, Identity, OrderConfirmation, OrderItem,
    OrderStatus, Overlays, PastOrder, Preferences, Role, Screen, Theme,
};
use crate::inbound::http::auth::{LoginRequest, RegisterRequest};
use crate::inbound::http::cart::{AddItemRequest, SetQuantityRequest};
use crate::inbound::http::views::{
    CartView, CategoryView, EntryView, OrderResponse, OrderStatusView, StorefrontView,
};

/// Register the session cookie carrying the visitor's storefront state.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted cookie holding the cart, open categories and sign-in state.",
            ))),
        );
    }
}

/// OpenAPI document for the storefront API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Restaurant storefront API",
        description = "Menu browsing, cart, mock sign-in and admin dashboard for a single restaurant."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::storefront::get_storefront,
        crate::inbound::http::storefront::toggle_category,
        crate::inbound::http::cart::get_cart,
        crate::inbound::http::cart::add_item,
        crate::inbound::http::cart::set_quantity,
        crate::inbound::http::cart::remove_item,
        crate::inbound::http::cart::open_panel,
        crate::inbound::http::cart::close_panel,
        crate::inbound::http::auth::open_auth_modal,
        crate::inbound::http::auth::close_auth_modal,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::open_admin_panel,
        crate::inbound::http::auth::back_to_storefront,
        crate::inbound::http::auth::place_order,
        crate::inbound::http::admin::list_orders,
        crate::inbound::http::admin::get_order,
        crate::inbound::http::preferences::get_preferences,
        crate::inbound::http::preferences::toggle_theme,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        StorefrontView,
        CategoryView,
        EntryView,
        CartView,
        CartLine,
        Screen,
        Overlays,
        Identity,
        Role,
        OrderResponse,
        OrderStatusView,
        OrderConfirmation,
        AddItemRequest,
        SetQuantityRequest,
        LoginRequest,
        RegisterRequest,
        Dashboard,
        DashboardSummary,
        PastOrder,
        OrderItem,
        OrderStatus,
        Preferences,
        Theme,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "storefront", description = "Menu browsing"),
        (name = "cart", description = "Cart contents and panel"),
        (name = "auth", description = "Mock sign-in"),
        (name = "view", description = "Screen switching"),
        (name = "orders", description = "Checkout"),
        (name = "admin", description = "Past orders for administrators"),
        (name = "preferences", description = "Device theme and table number"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        match schemas.get(name) {
            Some(RefOr::T(Schema::Object(object))) => object.properties.keys().cloned().collect(),
            other => panic!("expected object schema for {name}, got {other:?}"),
        }
    }

    #[rstest]
    #[case("/api/v1/storefront")]
    #[case("/api/v1/cart/items/{id}")]
    #[case("/api/v1/orders")]
    #[case("/api/v1/admin/orders/{id}")]
    #[case("/api/v1/preferences/theme/toggle")]
    #[case("/health/ready")]
    fn documents_endpoint(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn storefront_view_uses_camel_case_fields() {
        let fields = object_fields("StorefrontView");
        for field in ["restaurantName", "loadFailed", "categories", "cart", "overlays"] {
            assert!(fields.iter().any(|f| f == field), "missing field {field}");
        }
    }

    #[rstest]
    fn error_schema_has_code_and_message() {
        let fields = object_fields("Error");
        assert!(fields.iter().any(|f| f == "code"));
        assert!(fields.iter().any(|f| f == "message"));
    }
}
