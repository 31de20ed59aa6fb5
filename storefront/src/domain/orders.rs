//! Past orders shown on the admin dashboard.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identifier of a past order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct OrderId(u32);

impl OrderId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Completed,
    Pending,
}

/// One line of a past order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[schema(example = "Tiramisu")]
    pub name: String,
    #[schema(example = 2)]
    pub quantity: u32,
    /// Unit price in minor currency units.
    #[schema(example = 650)]
    pub price: u64,
}

/// A completed or in-progress order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PastOrder {
    #[schema(value_type = u32, example = 1)]
    pub id: OrderId,
    #[schema(example = "Marko Petrović")]
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    #[schema(example = 2500)]
    pub total: u64,
    #[schema(value_type = String, example = "2024-01-15")]
    pub date: NaiveDate,
    #[schema(value_type = String, example = "14:30:00")]
    pub time: NaiveTime,
    pub status: OrderStatus,
}

impl PastOrder {
    /// Sum of the items' price × quantity.
    pub fn items_total(&self) -> u64 {
        self.items.iter().fold(0_u64, |acc, item| {
            acc.saturating_add(item.price.saturating_mul(u64::from(item.quantity)))
        })
    }
}

/// Headline figures for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_revenue: u64,
    pub order_count: usize,
    pub today_count: usize,
    pub pending_count: usize,
}

impl DashboardSummary {
    /// Summarise `orders`, counting those dated `today`.
    pub fn from_orders(orders: &[PastOrder], today: NaiveDate) -> Self {
        orders.iter().fold(Self::default(), |mut summary, order| {
            summary.total_revenue = summary.total_revenue.saturating_add(order.total);
            summary.order_count += 1;
            if order.date == today {
                summary.today_count += 1;
            }
            if order.status == OrderStatus::Pending {
                summary.pending_count += 1;
            }
            summary
        })
    }
}
