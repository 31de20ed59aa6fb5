//! HTTP inbound adapter exposing the storefront REST endpoints.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod device;
pub mod error;
pub mod health;
pub mod preferences;
pub mod session;
pub mod session_config;
pub mod state;
pub mod storefront;
#[cfg(test)]
pub mod test_utils;
pub mod views;

pub use error::ApiResult;
