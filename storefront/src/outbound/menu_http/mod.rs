//! Menu service outbound adapter.
//!
//! A thin HTTP implementation of the `MenuSource` port.

mod dto;
mod http_source;

pub use http_source::MenuHttpSource;
