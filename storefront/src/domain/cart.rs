//! Cart ledger: one line per menu entry, quantities aggregated.
//!
//! ## Invariants
//! - At most one [`CartLine`] per [`MenuEntryId`].
//! - Quantities are never zero; a line dropping to zero is removed.
//! - Lines keep insertion order.
//!
//! Between requests a cart is kept as [`StoredLine`]s only. Names and prices
//! come back from the catalogue in [`Cart::restore`], which keeps the session
//! cookie small however many entries the visitor picks.

use std::collections::HashSet;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use super::{CatalogSnapshot, MenuEntry, MenuEntryId};

/// Errors raised by cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("quantity must not be negative (got {quantity})")]
    NegativeQuantity { quantity: i64 },
    #[error("quantity {quantity} exceeds the supported maximum")]
    QuantityTooLarge { quantity: i64 },
    #[error("cart contains more than one line for entry {id}")]
    DuplicateLine { id: MenuEntryId },
}

/// One distinct item in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[schema(value_type = i64, example = 12)]
    pub id: MenuEntryId,
    pub name: String,
    /// Unit price in minor currency units.
    pub price: u64,
    #[schema(value_type = u32, minimum = 1, example = 2)]
    pub quantity: NonZeroU32,
}

impl CartLine {
    fn from_entry(entry: &MenuEntry, quantity: NonZeroU32) -> Self {
        Self {
            id: entry.id,
            name: entry.name.clone(),
            price: entry.price,
            quantity,
        }
    }

    /// Price multiplied by quantity.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity.get()))
    }
}

/// The visitor's cart.
///
/// # Examples
/// ```
/// use storefront::domain::{Cart, MenuEntry, MenuEntryId};
///
/// let pasta = MenuEntry {
///     id: MenuEntryId::new(1),
///     name: "Pasta".into(),
///     description: String::new(),
///     price: 100,
///     image_ref: None,
/// };
/// let mut cart = Cart::default();
/// cart.add(&pasta);
/// cart.add(&pasta);
/// assert_eq!(cart.lines().len(), 1);
/// assert_eq!(cart.item_count(), 2);
/// assert_eq!(cart.total(), 200);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Increment the entry's line, inserting it at quantity one when absent.
    pub fn add(&mut self, entry: &MenuEntry) {
        match self.line_mut(entry.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self
                .lines
                .push(CartLine::from_entry(entry, NonZeroU32::MIN)),
        }
    }

    /// Drop the entry's line. Absent lines are ignored.
    pub fn remove(&mut self, id: MenuEntryId) {
        self.lines.retain(|line| line.id != id);
    }

    /// Replace the quantity of an existing line.
    ///
    /// Zero removes the line; a positive quantity for an absent line does
    /// nothing.
    pub fn set_quantity(&mut self, id: MenuEntryId, quantity: i64) -> Result<(), CartError> {
        if quantity < 0 {
            return Err(CartError::NegativeQuantity { quantity });
        }
        let raw = u32::try_from(quantity).map_err(|_| CartError::QuantityTooLarge { quantity })?;
        let Some(quantity) = NonZeroU32::new(raw) else {
            self.remove(id);
            return Ok(());
        };
        if let Some(line) = self.line_mut(id) {
            line.quantity = quantity;
        }
        Ok(())
    }

    /// Sum of price × quantity over all lines.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .fold(0_u64, |acc, line| acc.saturating_add(line.subtotal()))
    }

    /// Sum of quantities; distinct from the number of lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `id`, if the entry is in the cart.
    #[must_use]
    pub fn line(&self, id: MenuEntryId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Entry ids and quantities, in line order.
    #[must_use]
    pub fn stored_lines(&self) -> Vec<StoredLine> {
        self.lines
            .iter()
            .map(|line| StoredLine(line.id, line.quantity))
            .collect()
    }

    /// Rebuild a cart from stored lines, taking names and prices from
    /// `snapshot`.
    ///
    /// Lines whose entry is no longer on the menu are dropped. Two stored
    /// lines for the same entry are rejected.
    ///
    /// # Examples
    /// ```
    /// use std::num::NonZeroU32;
    ///
    /// use storefront::domain::ports::FixtureMenuSource;
    /// use storefront::domain::{Cart, CatalogSnapshot, MenuEntryId, StoredLine};
    ///
    /// let snapshot = CatalogSnapshot {
    ///     categories: FixtureMenuSource::categories(),
    ///     loaded: true,
    ///     ..CatalogSnapshot::default()
    /// };
    /// let stored = [StoredLine(MenuEntryId::new(2), NonZeroU32::new(3).unwrap())];
    /// let cart = Cart::restore(&stored, &snapshot).unwrap();
    /// assert_eq!(cart.item_count(), 3);
    /// ```
    pub fn restore(stored: &[StoredLine], snapshot: &CatalogSnapshot) -> Result<Self, CartError> {
        let mut seen = HashSet::with_capacity(stored.len());
        let mut lines = Vec::with_capacity(stored.len());
        for &StoredLine(id, quantity) in stored {
            if !seen.insert(id) {
                return Err(CartError::DuplicateLine { id });
            }
            match snapshot.find_entry(id) {
                Some(entry) => lines.push(CartLine::from_entry(entry, quantity)),
                None => debug!(%id, "dropping cart line for an entry no longer on the menu"),
            }
        }
        Ok(Self { lines })
    }

    fn line_mut(&mut self, id: MenuEntryId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id == id)
    }
}

/// Persisted cart line: entry id and quantity.
///
/// Serialises as a two-element array, e.g. `[12,3]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredLine(pub MenuEntryId, pub NonZeroU32);
