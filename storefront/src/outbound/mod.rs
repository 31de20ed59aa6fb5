//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **menu_http**: reqwest client for the restaurant menu service
//! - **preferences**: `cap_std` JSON file for device preferences
//!
//! Adapters translate between transport shapes and domain types. They
//! contain no business logic.

pub mod menu_http;
pub mod preferences;
