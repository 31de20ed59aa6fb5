//! Driving port for the admin dashboard.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DashboardSummary, Error, OrderId, PastOrder};

/// Dashboard payload: headline figures plus the order list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub summary: DashboardSummary,
    pub orders: Vec<PastOrder>,
}

/// Use-case port for reading past orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminOrdersQuery: Send + Sync {
    /// Summary and list of all past orders.
    async fn dashboard(&self) -> Result<Dashboard, Error>;

    /// One order by id; `not_found` when absent.
    async fn order(&self, id: OrderId) -> Result<PastOrder, Error>;
}

/// Fixture query with no orders.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAdminOrdersQuery;

#[async_trait]
impl AdminOrdersQuery for FixtureAdminOrdersQuery {
    async fn dashboard(&self) -> Result<Dashboard, Error> {
        Ok(Dashboard {
            summary: DashboardSummary::default(),
            orders: Vec::new(),
        })
    }

    async fn order(&self, id: OrderId) -> Result<PastOrder, Error> {
        Err(Error::not_found(format!("order {id} not found")))
    }
}
