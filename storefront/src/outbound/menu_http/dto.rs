//! DTOs for decoding menu service JSON.
//!
//! Responses are decoded into these transport shapes first and then mapped
//! into domain categories in one pass, validating prices and entry ids.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Number;

use crate::domain::{MenuCategory, MenuEntry, MenuEntryId};

#[derive(Debug, Deserialize)]
pub(super) struct RestaurantDto {
    pub(super) name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct CategoryDto {
    name: String,
    #[serde(default)]
    items: Vec<ItemDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ItemDto {
    id: i64,
    name: String,
    #[serde(default)]
    description: Option<String>,
    price_rs: Number,
    #[serde(default)]
    image_url: Option<String>,
}

/// Whole-unit prices may arrive as `1200` or `1200.0`.
fn parse_price(entry_id: i64, raw: &Number) -> Result<u64, String> {
    if let Some(price) = raw.as_u64() {
        return Ok(price);
    }
    match raw.as_f64() {
        Some(price) if price.is_finite() && price >= 0.0 && price.fract() == 0.0 => {
            format!("{price:.0}")
                .parse()
                .map_err(|_| format!("item {entry_id} price {raw} is out of range"))
        }
        _ => Err(format!("item {entry_id} has invalid price {raw}")),
    }
}

impl ItemDto {
    fn into_domain(self) -> Result<MenuEntry, String> {
        let price = parse_price(self.id, &self.price_rs)?;
        Ok(MenuEntry {
            id: MenuEntryId::new(self.id),
            name: self.name,
            description: self.description.unwrap_or_default(),
            price,
            image_ref: self.image_url.filter(|url| !url.trim().is_empty()),
        })
    }
}

pub(super) fn into_domain_categories(
    categories: Vec<CategoryDto>,
) -> Result<Vec<MenuCategory>, String> {
    let mut seen = HashSet::new();
    categories
        .into_iter()
        .map(|category| {
            let items = category
                .items
                .into_iter()
                .map(|item| {
                    let entry = item.into_domain()?;
                    if !seen.insert(entry.id) {
                        return Err(format!("item id {} appears more than once", entry.id));
                    }
                    Ok(entry)
                })
                .collect::<Result<Vec<_>, String>>()?;
            Ok(MenuCategory {
                name: category.name,
                items,
            })
        })
        .collect()
}
