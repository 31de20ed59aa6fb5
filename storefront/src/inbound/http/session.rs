//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The visitor's state travels in the encrypted session cookie under a single
//! key as a [`SessionRecord`]. Cart lines are stored as entry ids and
//! quantities only and are re-priced from the catalogue on every load.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{CatalogSnapshot, Error, SessionRecord, StorefrontSession};

pub(crate) const STOREFRONT_KEY: &str = "storefront";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    fn discard(&self, reason: &str) {
        warn!(reason, "discarding unreadable storefront session");
        self.0.remove(STOREFRONT_KEY);
    }

    /// Load the persisted record without touching the catalogue.
    ///
    /// A missing entry yields an empty record. An entry that no longer
    /// deserialises (tampered, or written by an older release) is discarded.
    pub fn record(&self) -> SessionRecord {
        match self.0.get::<SessionRecord>(STOREFRONT_KEY) {
            Ok(Some(record)) => record,
            Ok(None) => SessionRecord::default(),
            Err(error) => {
                self.discard(&error.to_string());
                SessionRecord::default()
            }
        }
    }

    /// Load the visitor's storefront state, pricing the cart from `snapshot`.
    pub fn storefront(&self, snapshot: &CatalogSnapshot) -> StorefrontSession {
        match StorefrontSession::restore(self.record(), snapshot) {
            Ok(state) => state,
            Err(error) => {
                self.discard(&error.to_string());
                StorefrontSession::default()
            }
        }
    }

    /// Persist the visitor's storefront state in the session cookie.
    pub fn persist(&self, state: &StorefrontSession) -> Result<(), Error> {
        self.0
            .insert(STOREFRONT_KEY, state.record())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
