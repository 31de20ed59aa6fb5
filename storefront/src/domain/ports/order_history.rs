//! Driven port for the history of past orders.
//!
//! Orders are not persisted by the storefront, so the only adapter is the
//! static fixture below.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use super::define_port_error;
use crate::domain::{OrderId, OrderItem, OrderStatus, PastOrder};

define_port_error! {
    /// Errors raised by order history adapters.
    pub enum OrderHistoryError {
        /// The history could not be produced.
        Unavailable { message: String } => "order history unavailable: {message}",
    }
}

/// Read access to past orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderHistory: Send + Sync {
    /// All past orders, newest first as stored.
    async fn orders(&self) -> Result<Vec<PastOrder>, OrderHistoryError>;
}

/// Three sample orders from January 2024.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOrderHistory;

fn item(name: &str, quantity: u32, price: u64) -> OrderItem {
    OrderItem {
        name: name.to_owned(),
        quantity,
        price,
    }
}

fn sample_order(
    id: u32,
    customer_name: &str,
    items: Vec<OrderItem>,
    (year, month, day): (i32, u32, u32),
    (hour, minute): (u32, u32),
    status: OrderStatus,
) -> Result<PastOrder, OrderHistoryError> {
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        OrderHistoryError::unavailable(format!("invalid date for order {id}"))
    })?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
        OrderHistoryError::unavailable(format!("invalid time for order {id}"))
    })?;
    let mut order = PastOrder {
        id: OrderId::new(id),
        customer_name: customer_name.to_owned(),
        items,
        total: 0,
        date,
        time,
        status,
    };
    order.total = order.items_total();
    Ok(order)
}

#[async_trait]
impl OrderHistory for FixtureOrderHistory {
    async fn orders(&self) -> Result<Vec<PastOrder>, OrderHistoryError> {
        Ok(vec![
            sample_order(
                1,
                "Marko Petrović",
                vec![item("Pasta Carbonara", 1, 1200), item("Tiramisu", 2, 650)],
                (2024, 1, 15),
                (14, 30),
                OrderStatus::Completed,
            )?,
            sample_order(
                2,
                "Ana Jovanović",
                vec![item("Biftek na žaru", 1, 1800), item("Cappuccino", 1, 220)],
                (2024, 1, 15),
                (15, 45),
                OrderStatus::Pending,
            )?,
            sample_order(
                3,
                "Stefan Nikolić",
                vec![
                    item("Bruschetta", 2, 450),
                    item("Rižoto sa gljivama", 1, 1100),
                    item("Panna Cotta", 1, 550),
                ],
                (2024, 1, 14),
                (19, 20),
                OrderStatus::Completed,
            )?,
        ])
    }
}
