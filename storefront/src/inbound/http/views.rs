//! Response payloads rendered from the catalogue and the visitor session.
//!
//! Every mutating storefront endpoint answers with a full
//! [`StorefrontView`] so clients never have to merge partial state.

use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

use crate::domain::{
    Cart, CartLine, CatalogSnapshot, Identity, MenuEntry, MenuEntryId, OrderConfirmation,
    Overlays, Screen, StorefrontSession, resolve_image_url,
};

/// One menu entry as displayed on the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    #[schema(value_type = i64, example = 2)]
    pub id: MenuEntryId,
    #[schema(example = "Pasta Carbonara")]
    pub name: String,
    pub description: String,
    #[schema(example = 1200)]
    pub price: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "http://192.168.1.164:5000/uploads/carbonara.jpg")]
    pub image_url: Option<String>,
    /// Units of this entry currently in the cart.
    pub quantity_in_cart: u32,
}

impl EntryView {
    fn render(entry: &MenuEntry, cart: &Cart, asset_base: &Url) -> Self {
        Self {
            id: entry.id,
            name: entry.name.clone(),
            description: entry.description.clone(),
            price: entry.price,
            image_url: entry
                .image_ref
                .as_deref()
                .and_then(|image_ref| resolve_image_url(asset_base, image_ref))
                .map(String::from),
            quantity_in_cart: cart.line(entry.id).map_or(0, |line| line.quantity.get()),
        }
    }
}

/// A menu category with its disclosure flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    #[schema(example = "Glavna jela")]
    pub name: String,
    pub open: bool,
    pub items: Vec<EntryView>,
}

/// Cart lines with derived totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLine>,
    #[schema(example = 2400)]
    pub total: u64,
    #[schema(example = 2)]
    pub item_count: u64,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().to_vec(),
            total: cart.total(),
            item_count: cart.item_count(),
        }
    }
}

/// Everything the single-page storefront needs to draw itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontView {
    #[schema(example = "Trattoria Fixture")]
    pub restaurant_name: String,
    pub loading: bool,
    pub load_failed: bool,
    pub categories: Vec<CategoryView>,
    pub cart: CartView,
    pub screen: Screen,
    pub overlays: Overlays,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
}

impl StorefrontView {
    /// Combine the shared catalogue with one visitor's session.
    pub fn render(snapshot: &CatalogSnapshot, session: &StorefrontSession, asset_base: &Url) -> Self {
        let categories = snapshot
            .categories
            .iter()
            .map(|category| CategoryView {
                name: category.name.clone(),
                open: session.disclosure.is_open(&category.name),
                items: category
                    .items
                    .iter()
                    .map(|entry| EntryView::render(entry, &session.cart, asset_base))
                    .collect(),
            })
            .collect();

        Self {
            restaurant_name: snapshot.restaurant_name.clone(),
            loading: snapshot.loading,
            load_failed: snapshot.load_failed,
            categories,
            cart: CartView::from(&session.cart),
            screen: session.router.screen(),
            overlays: session.router.overlays(),
            identity: session.router.identity().cloned(),
        }
    }
}

/// How an order attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatusView {
    OrderPlaced,
    SignInRequired,
}

/// Response to `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub status: OrderStatusView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<OrderConfirmation>,
    pub view: StorefrontView,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::FixtureMenuSource;
    use crate::domain::{MenuCategory, MenuEntry};
    use rstest::{fixture, rstest};

    #[fixture]
    fn asset_base() -> Url {
        Url::parse("http://assets.test/api").expect("asset base")
    }

    #[fixture]
    fn snapshot() -> CatalogSnapshot {
        let mut categories = FixtureMenuSource::categories();
        categories.push(MenuCategory {
            name: "Pice".to_owned(),
            items: vec![MenuEntry {
                id: MenuEntryId::new(9),
                name: "Limonada".to_owned(),
                description: String::new(),
                price: 300,
                image_ref: Some("/uploads/limonada.jpg".to_owned()),
            }],
        });
        CatalogSnapshot {
            restaurant_name: "Trattoria".to_owned(),
            categories,
            loading: false,
            loaded: true,
            load_failed: false,
        }
    }

    #[rstest]
    fn renders_disclosure_cart_quantities_and_images(snapshot: CatalogSnapshot, asset_base: Url) {
        let mut session = StorefrontSession::default();
        session.disclosure.toggle("Pice");
        let limonada = snapshot
            .find_entry(MenuEntryId::new(9))
            .cloned()
            .expect("entry");
        session.cart.add(&limonada);
        session.cart.add(&limonada);

        let view = StorefrontView::render(&snapshot, &session, &asset_base);

        let pice = view
            .categories
            .iter()
            .find(|category| category.name == "Pice")
            .expect("category");
        assert!(pice.open);
        assert_eq!(pice.items[0].quantity_in_cart, 2);
        assert_eq!(
            pice.items[0].image_url.as_deref(),
            Some("http://assets.test/api/uploads/limonada.jpg")
        );
        assert!(view.categories.iter().filter(|c| c.name != "Pice").all(|c| !c.open));
        assert_eq!(view.cart.total, 600);
        assert_eq!(view.cart.item_count, 2);
        assert!(view.identity.is_none());
    }

    #[rstest]
    fn entries_without_images_omit_the_url(snapshot: CatalogSnapshot, asset_base: Url) {
        let view = StorefrontView::render(&snapshot, &StorefrontSession::default(), &asset_base);
        let value = serde_json::to_value(&view).expect("serialise");
        assert!(value["categories"][0]["items"][0].get("imageUrl").is_none());
        assert_eq!(value["screen"], "storefront");
        assert_eq!(value["overlays"]["cartPanel"], false);
    }
}
