//! Driving port for the mock sign-in flow.
//!
//! Evaluation is synchronous and total: every login and registration yields
//! an identity. Only the role differs.

use crate::domain::{Identity, LoginCredentials, Registration};

/// Email of the single built-in administrator.
pub const ADMIN_EMAIL: &str = "admin@restoran.com";
/// Password of the single built-in administrator.
pub const ADMIN_PASSWORD: &str = "admin123";
/// Display name given to the administrator identity.
pub const ADMIN_DISPLAY_NAME: &str = "Administrator";

/// Credential evaluation and role derivation.
#[cfg_attr(test, mockall::automock)]
pub trait AuthGate: Send + Sync {
    /// Evaluate login credentials.
    fn login(&self, credentials: &LoginCredentials) -> Identity;

    /// Create an identity from a registration form.
    fn register(&self, registration: &Registration) -> Identity;
}

/// Hard-coded credential check.
///
/// The administrator is recognised by an exact, case-sensitive match on
/// [`ADMIN_EMAIL`] and [`ADMIN_PASSWORD`]. Anyone else becomes a customer
/// named after the local part of their email.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthGate;

impl AuthGate for FixtureAuthGate {
    fn login(&self, credentials: &LoginCredentials) -> Identity {
        if credentials.email() == ADMIN_EMAIL && credentials.password() == ADMIN_PASSWORD {
            Identity::admin(ADMIN_DISPLAY_NAME)
        } else {
            Identity::customer(credentials.local_part())
        }
    }

    fn register(&self, registration: &Registration) -> Identity {
        Identity::customer(registration.name())
    }
}
