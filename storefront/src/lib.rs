//! Restaurant storefront library modules.
//!
//! The crate is laid out as a small hexagon: `domain` owns the cart, category
//! disclosure, mock authentication and view routing state; `inbound` exposes
//! it over HTTP; `outbound` talks to the menu service and the preferences
//! store.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
