//! Per-visitor UI state and the reducer that drives it.
//!
//! Every user interaction is an [`Action`]. [`StorefrontSession::apply`]
//! applies exactly one action; failed actions leave the state untouched.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use utoipa::ToSchema;

use super::ports::AuthGate;
use super::{
    Cart, CartError, CatalogSnapshot, Disclosure, Error, LoginCredentials, MenuEntry, MenuEntryId,
    Registration, StoredLine, ViewError, ViewRouter,
};

/// Errors raised when an action cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    View(#[from] ViewError),
    #[error("cannot place an order with an empty cart")]
    EmptyCart,
}

impl From<StorefrontError> for Error {
    fn from(value: StorefrontError) -> Self {
        let message = value.to_string();
        match value {
            StorefrontError::Cart(
                CartError::NegativeQuantity { quantity } | CartError::QuantityTooLarge { quantity },
            ) => Error::invalid_request(message)
                .with_details(json!({ "field": "quantity", "value": quantity })),
            StorefrontError::Cart(CartError::DuplicateLine { .. }) => Error::internal(message),
            StorefrontError::View(_) => Error::forbidden(message),
            StorefrontError::EmptyCart => Error::invalid_request(message),
        }
    }
}

/// One user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddToCart(MenuEntry),
    RemoveFromCart(MenuEntryId),
    SetQuantity { id: MenuEntryId, quantity: i64 },
    ToggleCategory(String),
    OpenAuthModal,
    CloseAuthModal,
    OpenCart,
    CloseCart,
    Login(LoginCredentials),
    Register(Registration),
    Logout,
    OpenAdminPanel,
    BackToStorefront,
    PlaceOrder,
}

impl Action {
    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddToCart(_) => "add_to_cart",
            Self::RemoveFromCart(_) => "remove_from_cart",
            Self::SetQuantity { .. } => "set_quantity",
            Self::ToggleCategory(_) => "toggle_category",
            Self::OpenAuthModal => "open_auth_modal",
            Self::CloseAuthModal => "close_auth_modal",
            Self::OpenCart => "open_cart",
            Self::CloseCart => "close_cart",
            Self::Login(_) => "login",
            Self::Register(_) => "register",
            Self::Logout => "logout",
            Self::OpenAdminPanel => "open_admin_panel",
            Self::BackToStorefront => "back_to_storefront",
            Self::PlaceOrder => "place_order",
        }
    }
}

/// Mocked order confirmation. Nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    #[schema(example = 2500)]
    pub total: u64,
    #[schema(example = 3)]
    pub item_count: u64,
    #[schema(example = "bob")]
    pub placed_by: String,
}

/// Result of a successfully applied action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    /// An order was attempted without an identity; the auth modal is now open.
    SignInRequired,
    OrderPlaced(OrderConfirmation),
}

/// Everything the storefront remembers about one visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorefrontSession {
    pub cart: Cart,
    pub disclosure: Disclosure,
    pub router: ViewRouter,
}

/// Persisted form of a [`StorefrontSession`].
///
/// The cart is reduced to entry ids and quantities; see
/// [`StorefrontSession::restore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionRecord {
    pub cart: Vec<StoredLine>,
    pub disclosure: Disclosure,
    pub router: ViewRouter,
}

impl StorefrontSession {
    /// Reduce the session to its persisted form.
    #[must_use]
    pub fn record(&self) -> SessionRecord {
        SessionRecord {
            cart: self.cart.stored_lines(),
            disclosure: self.disclosure.clone(),
            router: self.router.clone(),
        }
    }

    /// Rebuild a session from its persisted form against the current
    /// catalogue.
    pub fn restore(record: SessionRecord, snapshot: &CatalogSnapshot) -> Result<Self, CartError> {
        Ok(Self {
            cart: Cart::restore(&record.cart, snapshot)?,
            disclosure: record.disclosure,
            router: record.router,
        })
    }

    /// Apply one action.
    ///
    /// # Examples
    /// ```
    /// use storefront::domain::ports::FixtureAuthGate;
    /// use storefront::domain::{Action, LoginCredentials, Screen, StorefrontSession};
    ///
    /// let mut session = StorefrontSession::default();
    /// let creds = LoginCredentials::new("admin@restoran.com", "admin123");
    /// session.apply(Action::Login(creds), &FixtureAuthGate).unwrap();
    /// assert_eq!(session.router.screen(), Screen::AdminDashboard);
    /// ```
    pub fn apply(
        &mut self,
        action: Action,
        auth: &dyn AuthGate,
    ) -> Result<Outcome, StorefrontError> {
        debug!(action = action.kind(), "applying storefront action");
        match action {
            Action::AddToCart(entry) => self.cart.add(&entry),
            Action::RemoveFromCart(id) => self.cart.remove(id),
            Action::SetQuantity { id, quantity } => self.cart.set_quantity(id, quantity)?,
            Action::ToggleCategory(name) => {
                self.disclosure.toggle(&name);
            }
            Action::OpenAuthModal => self.router.set_auth_modal(true),
            Action::CloseAuthModal => self.router.set_auth_modal(false),
            Action::OpenCart => self.router.set_cart_panel(true),
            Action::CloseCart => self.router.set_cart_panel(false),
            Action::Login(credentials) => self.router.sign_in(auth.login(&credentials)),
            Action::Register(registration) => {
                self.router.sign_in(auth.register(&registration));
            }
            Action::Logout => {
                self.router.sign_out();
                self.cart.clear();
            }
            Action::OpenAdminPanel => self.router.open_admin_panel()?,
            Action::BackToStorefront => self.router.back_to_storefront(),
            Action::PlaceOrder => return self.place_order(),
        }
        Ok(Outcome::Updated)
    }

    fn place_order(&mut self) -> Result<Outcome, StorefrontError> {
        if self.cart.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }
        self.router.set_cart_panel(false);
        let placed_by = self
            .router
            .identity()
            .map(|identity| identity.display_name().to_owned());
        let Some(placed_by) = placed_by else {
            self.router.set_auth_modal(true);
            return Ok(Outcome::SignInRequired);
        };
        Ok(Outcome::OrderPlaced(OrderConfirmation {
            total: self.cart.total(),
            item_count: self.cart.item_count(),
            placed_by,
        }))
    }
}
