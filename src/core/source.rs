//! Abstractions over where dashboard data comes from.

use crate::core::error::Result;
use crate::core::models::{DashboardSummary, InvestmentPerformance, Transaction};
use async_trait::async_trait;
use serde::Serialize;

/// Window into the transaction list. Serialized as the `skip`/`limit` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListParams {
    pub skip: u32,
    pub limit: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self { skip: 0, limit: 100 }
    }
}

#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn summary(&self) -> Result<DashboardSummary>;
}

#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Transactions in service order, most recent first.
    async fn list(&self, params: ListParams) -> Result<Vec<Transaction>>;
}

#[async_trait]
pub trait InvestmentSource: Send + Sync {
    async fn performance(&self) -> Result<InvestmentPerformance>;
}
