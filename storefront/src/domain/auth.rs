//! Identity and credential primitives for the mock sign-in flow.
//!
//! Credentials are accepted as given: the mock gate never rejects a login,
//! so no validation happens here. Passwords are zeroised on drop.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

/// Role derived when an identity is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Admin,
}

/// The signed-in visitor.
///
/// # Examples
/// ```
/// use storefront::domain::{Identity, Role};
///
/// let ana = Identity::customer("ana");
/// assert_eq!(ana.role(), Role::Customer);
/// assert!(!ana.is_admin());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[schema(example = "Administrator")]
    display_name: String,
    role: Role,
}

impl Identity {
    /// A signed-in customer shown as `display_name`.
    pub fn customer(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            role: Role::Customer,
        }
    }

    /// The administrator shown as `display_name`.
    pub fn admin(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            role: Role::Admin,
        }
    }

    /// Name shown in the header, e.g. `ana` for `ana@example.com`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Whether this identity may open the admin dashboard.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Email and password submitted on the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Wrap a login form submission; the password is zeroed on drop.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Text before the first `@`, or the whole email when there is none.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.email
            .split_once('@')
            .map_or(self.email.as_str(), |(local, _)| local)
    }
}

/// Details submitted on the registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: String,
    credentials: LoginCredentials,
}

impl Registration {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            credentials: LoginCredentials::new(email, password),
        }
    }

    /// Name typed on the registration form.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    #[must_use]
    pub const fn credentials(&self) -> &LoginCredentials {
        &self.credentials
    }
}
