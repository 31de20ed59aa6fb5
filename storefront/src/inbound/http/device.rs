//! Long-lived device cookie keying visitor preferences.
//!
//! The storefront session expires after a couple of hours, but the theme and
//! table number belong to the browser. A separate plain cookie carries a
//! random [`DeviceId`] for a year. Requests without a readable id get a
//! fresh one, which handlers hand back through [`Device::remember`].

use std::future::{Ready, ready};

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{FromRequest, HttpRequest, HttpResponseBuilder, dev::Payload};
use tracing::debug;

use crate::domain::DeviceId;

/// Name of the cookie holding the device id.
pub const DEVICE_COOKIE: &str = "storefront_device";

const DEVICE_COOKIE_MAX_AGE: Duration = Duration::days(365);

/// The device behind a request.
#[derive(Debug, Clone, Copy)]
pub struct Device {
    id: DeviceId,
    issued: bool,
    secure: bool,
}

impl Device {
    /// Identifier the visitor's preferences are stored under.
    #[must_use]
    pub const fn id(&self) -> &DeviceId {
        &self.id
    }

    /// Whether the id was minted for this request.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.issued
    }

    /// Set the device cookie on `response` when the id is new.
    pub fn remember(&self, response: &mut HttpResponseBuilder) {
        if !self.issued {
            return;
        }
        let cookie = Cookie::build(DEVICE_COOKIE, self.id.to_string())
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(DEVICE_COOKIE_MAX_AGE)
            .finish();
        response.cookie(cookie);
    }

    fn from_cookie(req: &HttpRequest) -> Self {
        let secure = req.connection_info().scheme() == "https";
        let known = req
            .cookie(DEVICE_COOKIE)
            .and_then(|cookie| cookie.value().parse::<DeviceId>().ok());
        match known {
            Some(id) => Self {
                id,
                issued: false,
                secure,
            },
            None => {
                let id = DeviceId::generate();
                debug!(device = %id, "issuing device id");
                Self {
                    id,
                    issued: true,
                    secure,
                }
            }
        }
    }
}

impl FromRequest for Device {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_cookie(req)))
    }
}
