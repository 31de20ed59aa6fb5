//! Menu catalogue data model.
//!
//! Categories and entries are produced wholesale by the menu service and are
//! read-only for the rest of the domain. [`CatalogSnapshot`] is the view of
//! the catalogue the storefront renders, including the loading flags.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

/// Validation errors returned by [`RestaurantId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogValidationError {
    #[error("restaurant id must not be empty")]
    EmptyRestaurantId,
    #[error("restaurant id may only contain letters, digits, '-' or '_'")]
    InvalidRestaurantId,
}

/// Identifier of the restaurant whose menu is served.
///
/// The value is embedded in outbound URL paths, so it is restricted to a
/// conservative character set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RestaurantId(String);

impl RestaurantId {
    /// Validate and construct a [`RestaurantId`].
    ///
    /// # Examples
    /// ```
    /// use storefront::domain::RestaurantId;
    ///
    /// assert!(RestaurantId::new("42").is_ok());
    /// assert!(RestaurantId::new("../admin").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, CatalogValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CatalogValidationError::EmptyRestaurantId);
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(CatalogValidationError::InvalidRestaurantId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for RestaurantId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<RestaurantId> for String {
    fn from(value: RestaurantId) -> Self {
        value.0
    }
}

impl TryFrom<String> for RestaurantId {
    type Error = CatalogValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Identifier of a menu entry, unique within one catalogue.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct MenuEntryId(i64);

impl MenuEntryId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for MenuEntryId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for MenuEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One purchasable menu item.
///
/// `price` is expressed in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    #[schema(value_type = i64, example = 12)]
    pub id: MenuEntryId,
    #[schema(example = "Pasta Carbonara")]
    pub name: String,
    pub description: String,
    #[schema(example = 1200)]
    pub price: u64,
    /// Path relative to the asset base URL, when the entry has an image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

/// A named group of menu entries, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    #[schema(example = "Pasta")]
    pub name: String,
    pub items: Vec<MenuEntry>,
}

/// Locate an entry by id across all categories.
pub fn find_entry(categories: &[MenuCategory], id: MenuEntryId) -> Option<&MenuEntry> {
    categories
        .iter()
        .flat_map(|category| category.items.iter())
        .find(|entry| entry.id == id)
}

/// Resolve an entry's image reference against the asset base URL.
///
/// References are appended to the base path rather than resolved as relative
/// URLs, so a base of `http://host/api` and a reference of `/img/a.png` yields
/// `http://host/api/img/a.png`.
///
/// # Examples
/// ```
/// use storefront::domain::resolve_image_url;
/// use url::Url;
///
/// let base = Url::parse("http://192.168.1.164:5000").unwrap();
/// let url = resolve_image_url(&base, "/uploads/carbonara.jpg").unwrap();
/// assert_eq!(url.as_str(), "http://192.168.1.164:5000/uploads/carbonara.jpg");
/// ```
pub fn resolve_image_url(base: &Url, image_ref: &str) -> Option<Url> {
    let image_ref = image_ref.trim();
    if image_ref.is_empty() {
        return None;
    }
    let base = base.as_str().trim_end_matches('/');
    let joined = if image_ref.starts_with('/') {
        format!("{base}{image_ref}")
    } else {
        format!("{base}/{image_ref}")
    };
    Url::parse(&joined).ok()
}

/// Catalogue state as seen by the storefront.
///
/// `loading` is true while any fetch is outstanding. `load_failed` reports
/// whether the most recent menu fetch failed; the categories then still hold
/// whatever the previous successful fetch produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub restaurant_name: String,
    pub categories: Vec<MenuCategory>,
    pub loading: bool,
    pub loaded: bool,
    pub load_failed: bool,
}

impl CatalogSnapshot {
    /// Locate an entry by id.
    pub fn find_entry(&self, id: MenuEntryId) -> Option<&MenuEntry> {
        find_entry(&self.categories, id)
    }

    /// Whether the named category exists in the catalogue.
    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|category| category.name == name)
    }

    /// Whether at least one menu fetch has finished, successfully or not.
    pub fn settled(&self) -> bool {
        self.loaded || self.load_failed
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn entry(id: i64, name: &str) -> MenuEntry {
        MenuEntry {
            id: MenuEntryId::new(id),
            name: name.to_owned(),
            description: String::new(),
            price: 100,
            image_ref: None,
        }
    }

    #[rstest]
    #[case("", CatalogValidationError::EmptyRestaurantId)]
    #[case("   ", CatalogValidationError::EmptyRestaurantId)]
    #[case("12/menu", CatalogValidationError::InvalidRestaurantId)]
    #[case("a b", CatalogValidationError::InvalidRestaurantId)]
    fn rejects_unsafe_restaurant_ids(#[case] raw: &str, #[case] expected: CatalogValidationError) {
        assert_eq!(RestaurantId::new(raw), Err(expected));
    }

    #[rstest]
    #[case("7")]
    #[case("caffe-resto_01")]
    fn accepts_path_safe_restaurant_ids(#[case] raw: &str) {
        let id = RestaurantId::new(raw).expect("valid id");
        assert_eq!(id.as_ref(), raw);
    }

    #[rstest]
    #[case("http://host:5000", "/img/a.png", "http://host:5000/img/a.png")]
    #[case("http://host:5000/", "/img/a.png", "http://host:5000/img/a.png")]
    #[case("http://host/api", "img/a.png", "http://host/api/img/a.png")]
    fn resolves_image_refs_by_prefixing(
        #[case] base: &str,
        #[case] image_ref: &str,
        #[case] expected: &str,
    ) {
        let base = Url::parse(base).expect("base url");
        let resolved = resolve_image_url(&base, image_ref).expect("resolved url");
        assert_eq!(resolved.as_str(), expected);
    }

    #[test]
    fn blank_image_refs_resolve_to_nothing() {
        let base = Url::parse("http://host").expect("base url");
        assert!(resolve_image_url(&base, "  ").is_none());
    }

    #[test]
    fn finds_entries_across_categories() {
        let snapshot = CatalogSnapshot {
            categories: vec![
                MenuCategory {
                    name: "Starters".to_owned(),
                    items: vec![entry(1, "Bruschetta")],
                },
                MenuCategory {
                    name: "Desserts".to_owned(),
                    items: vec![entry(2, "Tiramisu")],
                },
            ],
            ..CatalogSnapshot::default()
        };

        let found = snapshot.find_entry(MenuEntryId::new(2)).expect("entry");
        assert_eq!(found.name, "Tiramisu");
        assert!(snapshot.find_entry(MenuEntryId::new(3)).is_none());
        assert!(snapshot.has_category("Desserts"));
        assert!(!snapshot.has_category("Drinks"));
    }
}
