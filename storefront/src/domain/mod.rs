//! Domain primitives, services and ports.
//!
//! Purpose: keep the storefront's state machine (cart, category disclosure,
//! identity and view routing) free of transport concerns. Inbound adapters
//! translate requests into [`Action`]s; outbound adapters implement the
//! driven [`ports`].

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod catalog_service;
pub mod disclosure;
pub mod error;
pub mod orders;
pub mod orders_service;
pub mod ports;
pub mod preferences;
pub mod preferences_service;
pub mod storefront;
pub mod trace_id;
pub mod view;

pub use self::auth::{Identity, LoginCredentials, Registration, Role};
pub use self::cart::{Cart, CartError, CartLine, StoredLine};
pub use self::catalog::{
    CatalogSnapshot, CatalogValidationError, MenuCategory, MenuEntry, MenuEntryId, RestaurantId,
    find_entry, resolve_image_url,
};
pub use self::catalog_service::{CatalogService, RefreshOutcome};
pub use self::disclosure::Disclosure;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::orders::{DashboardSummary, OrderId, OrderItem, OrderStatus, PastOrder};
pub use self::orders_service::AdminOrdersService;
pub use self::preferences::{
    DeviceId, Preferences, TABLE_NUMBER_KEY, THEME_KEY, TableNumber, TableNumberValidationError,
    Theme, ThemeParseError,
};
pub use self::preferences_service::PreferencesService;
pub use self::storefront::{
    Action, OrderConfirmation, Outcome, SessionRecord, StorefrontError, StorefrontSession,
};
pub use self::trace_id::TraceId;
pub use self::view::{Overlays, Screen, ViewError, ViewEvent, ViewRouter, next_screen};
