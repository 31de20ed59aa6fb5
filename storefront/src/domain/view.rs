//! Top-level view selection.
//!
//! The active [`Screen`] is driven by a transition table over [`ViewEvent`]s.
//! Overlays (auth modal, cart panel) are independent flags layered on top.
//!
//! ## Invariants
//! - [`Screen::AdminDashboard`] is only active while an admin identity is
//!   signed in. Construction and deserialisation both enforce this.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Identity;

/// Errors raised by view transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("the admin dashboard requires an administrator")]
    AdminRequired,
}

/// Main screen of the single-page interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Storefront,
    AdminDashboard,
}

/// Overlay visibility flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Overlays {
    pub auth_modal: bool,
    pub cart_panel: bool,
}

/// Events that move between screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// Successful login or registration.
    SignedIn { admin: bool },
    OpenAdminPanel,
    Back,
    Logout,
}

/// Transition table for [`Screen`].
///
/// `admin` reports whether the identity in effect after the event is an
/// administrator.
///
/// # Examples
/// ```
/// use storefront::domain::{Screen, ViewError, ViewEvent, next_screen};
///
/// assert_eq!(
///     next_screen(Screen::Storefront, ViewEvent::OpenAdminPanel, true),
///     Ok(Screen::AdminDashboard),
/// );
/// assert_eq!(
///     next_screen(Screen::Storefront, ViewEvent::OpenAdminPanel, false),
///     Err(ViewError::AdminRequired),
/// );
/// ```
pub fn next_screen(current: Screen, event: ViewEvent, admin: bool) -> Result<Screen, ViewError> {
    match (event, current) {
        (ViewEvent::SignedIn { admin: true }, _) => Ok(Screen::AdminDashboard),
        (ViewEvent::SignedIn { admin: false }, _) => Ok(Screen::Storefront),
        (ViewEvent::OpenAdminPanel, _) if admin => Ok(Screen::AdminDashboard),
        (ViewEvent::OpenAdminPanel, _) => Err(ViewError::AdminRequired),
        (ViewEvent::Back, Screen::AdminDashboard | Screen::Storefront) => Ok(Screen::Storefront),
        (ViewEvent::Logout, _) => Ok(Screen::Storefront),
    }
}

/// Current identity, screen and overlays for one visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ViewRouterDto", into = "ViewRouterDto")]
pub struct ViewRouter {
    identity: Option<Identity>,
    screen: Screen,
    overlays: Overlays,
}

impl ViewRouter {
    /// Build a router, rejecting an admin screen without an admin identity.
    pub fn try_new(
        identity: Option<Identity>,
        screen: Screen,
        overlays: Overlays,
    ) -> Result<Self, ViewError> {
        let admin = identity.as_ref().is_some_and(Identity::is_admin);
        if screen == Screen::AdminDashboard && !admin {
            return Err(ViewError::AdminRequired);
        }
        Ok(Self {
            identity,
            screen,
            overlays,
        })
    }

    /// The signed-in visitor, if any.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Screen currently shown.
    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    /// Which overlays are open on top of the screen.
    #[must_use]
    pub const fn overlays(&self) -> Overlays {
        self.overlays
    }

    /// Whether the signed-in visitor is the administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.identity.as_ref().is_some_and(Identity::is_admin)
    }

    /// Install a freshly authenticated identity and close the auth modal.
    pub fn sign_in(&mut self, identity: Identity) {
        let event = ViewEvent::SignedIn {
            admin: identity.is_admin(),
        };
        self.screen =
            next_screen(self.screen, event, identity.is_admin()).unwrap_or(Screen::Storefront);
        self.identity = Some(identity);
        self.overlays.auth_modal = false;
    }

    /// Drop the identity, return to the storefront and close every overlay.
    pub fn sign_out(&mut self) {
        self.identity = None;
        self.screen = Screen::Storefront;
        self.overlays = Overlays::default();
    }

    /// Switch to the admin dashboard.
    ///
    /// # Errors
    /// [`ViewError::AdminRequired`] when nobody or a customer is signed in;
    /// the screen is left unchanged.
    pub fn open_admin_panel(&mut self) -> Result<(), ViewError> {
        self.screen = next_screen(self.screen, ViewEvent::OpenAdminPanel, self.is_admin())?;
        Ok(())
    }

    /// Return to the menu. Overlays keep their state.
    pub fn back_to_storefront(&mut self) {
        self.screen = Screen::Storefront;
    }

    /// Show or hide the login/registration modal.
    pub fn set_auth_modal(&mut self, visible: bool) {
        self.overlays.auth_modal = visible;
    }

    /// Show or hide the cart side panel.
    pub fn set_cart_panel(&mut self, visible: bool) {
        self.overlays.cart_panel = visible;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViewRouterDto {
    #[serde(default)]
    identity: Option<Identity>,
    #[serde(default)]
    screen: Screen,
    #[serde(default)]
    overlays: Overlays,
}

impl From<ViewRouter> for ViewRouterDto {
    fn from(value: ViewRouter) -> Self {
        Self {
            identity: value.identity,
            screen: value.screen,
            overlays: value.overlays,
        }
    }
}

impl TryFrom<ViewRouterDto> for ViewRouter {
    type Error = ViewError;

    fn try_from(value: ViewRouterDto) -> Result<Self, Self::Error> {
        Self::try_new(value.identity, value.screen, value.overlays)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn admin_router() -> ViewRouter {
        let mut router = ViewRouter::default();
        router.sign_in(Identity::admin("Administrator"));
        router
    }

    #[rstest]
    #[case(Screen::Storefront, ViewEvent::SignedIn { admin: true }, false, Ok(Screen::AdminDashboard))]
    #[case(Screen::AdminDashboard, ViewEvent::SignedIn { admin: false }, false, Ok(Screen::Storefront))]
    #[case(Screen::Storefront, ViewEvent::OpenAdminPanel, true, Ok(Screen::AdminDashboard))]
    #[case(Screen::Storefront, ViewEvent::OpenAdminPanel, false, Err(ViewError::AdminRequired))]
    #[case(Screen::AdminDashboard, ViewEvent::Back, true, Ok(Screen::Storefront))]
    #[case(Screen::Storefront, ViewEvent::Back, false, Ok(Screen::Storefront))]
    #[case(Screen::AdminDashboard, ViewEvent::Logout, true, Ok(Screen::Storefront))]
    fn transition_table(
        #[case] from: Screen,
        #[case] event: ViewEvent,
        #[case] admin: bool,
        #[case] expected: Result<Screen, ViewError>,
    ) {
        assert_eq!(next_screen(from, event, admin), expected);
    }

    #[rstest]
    fn admin_sign_in_opens_dashboard_and_closes_modal() {
        let mut router = ViewRouter::default();
        router.set_auth_modal(true);
        router.sign_in(Identity::admin("Administrator"));
        assert_eq!(router.screen(), Screen::AdminDashboard);
        assert!(!router.overlays().auth_modal);
    }

    #[rstest]
    fn customer_sign_in_leaves_dashboard(mut admin_router: ViewRouter) {
        admin_router.sign_in(Identity::customer("bob"));
        assert_eq!(admin_router.screen(), Screen::Storefront);
        assert!(!admin_router.is_admin());
    }

    #[rstest]
    fn sign_out_resets_everything(mut admin_router: ViewRouter) {
        admin_router.set_cart_panel(true);
        admin_router.set_auth_modal(true);
        admin_router.sign_out();
        assert_eq!(admin_router, ViewRouter::default());
    }

    #[rstest]
    fn customers_cannot_open_the_dashboard() {
        let mut router = ViewRouter::default();
        router.sign_in(Identity::customer("bob"));
        assert_eq!(router.open_admin_panel(), Err(ViewError::AdminRequired));
        assert_eq!(router.screen(), Screen::Storefront);
    }

    #[rstest]
    fn construction_rejects_dashboard_without_admin() {
        let result = ViewRouter::try_new(
            Some(Identity::customer("bob")),
            Screen::AdminDashboard,
            Overlays::default(),
        );
        assert_eq!(result, Err(ViewError::AdminRequired));
    }

    #[rstest]
    fn deserialisation_rejects_dashboard_without_admin() {
        let payload = json!({ "screen": "admin_dashboard" });
        let result: Result<ViewRouter, _> = serde_json::from_value(payload);
        assert!(result.is_err());
    }

    #[rstest]
    fn serde_round_trip_keeps_admin_dashboard(admin_router: ViewRouter) {
        let value = serde_json::to_value(&admin_router).expect("serialise");
        let restored: ViewRouter = serde_json::from_value(value).expect("deserialise");
        assert_eq!(restored, admin_router);
    }
}
