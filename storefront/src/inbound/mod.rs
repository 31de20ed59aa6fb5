//! Inbound adapters translating external requests into domain actions.

pub mod http;
