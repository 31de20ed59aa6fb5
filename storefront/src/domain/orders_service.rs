//! Admin dashboard service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{AdminOrdersQuery, Dashboard, OrderHistory, OrderHistoryError};
use crate::domain::{DashboardSummary, Error, OrderId, PastOrder};

/// Reads the order history and summarises it against the current UTC date.
pub struct AdminOrdersService<H: ?Sized> {
    history: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<H: ?Sized> AdminOrdersService<H> {
    pub fn new(history: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self { history, clock }
    }
}

fn map_history_error(error: OrderHistoryError) -> Error {
    match error {
        OrderHistoryError::Unavailable { message } => {
            Error::service_unavailable(format!("order history unavailable: {message}"))
        }
    }
}

#[async_trait]
impl<H> AdminOrdersQuery for AdminOrdersService<H>
where
    H: OrderHistory + ?Sized,
{
    async fn dashboard(&self) -> Result<Dashboard, Error> {
        let orders = self.history.orders().await.map_err(map_history_error)?;
        let today = self.clock.utc().date_naive();
        Ok(Dashboard {
            summary: DashboardSummary::from_orders(&orders, today),
            orders,
        })
    }

    async fn order(&self, id: OrderId) -> Result<PastOrder, Error> {
        self.history
            .orders()
            .await
            .map_err(map_history_error)?
            .into_iter()
            .find(|order| order.id == id)
            .ok_or_else(|| Error::not_found(format!("order {id} not found")))
    }
}
