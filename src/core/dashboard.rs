//! Concurrent loading of everything the dashboard needs.
use crate::core::error::{ApiError, Result};
use crate::core::models::{DashboardSummary, InvestmentPerformance, Transaction};
use crate::core::source::{DashboardSource, InvestmentSource, ListParams, TransactionSource};
use tracing::{debug, error};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub summary: DashboardSummary,
    pub transactions: Vec<Transaction>,
    pub performance: InvestmentPerformance,
}

/// Outcome of a dashboard load. There is no partially loaded state: one
/// failed fetch fails the whole load.
#[derive(Debug)]
pub enum DashboardState {
    Loaded(DashboardData),
    Failed(ApiError),
}

impl DashboardState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, DashboardState::Loaded(_))
    }

    pub fn into_result(self) -> Result<DashboardData> {
        match self {
            DashboardState::Loaded(data) => Ok(data),
            DashboardState::Failed(e) => Err(e),
        }
    }
}

/// Fetches summary, the first page of transactions and investment
/// performance at the same time. Resolves as soon as all three succeed or
/// any one fails; the remaining fetches are dropped on failure.
pub async fn load_dashboard(
    dashboard: &dyn DashboardSource,
    transactions: &dyn TransactionSource,
    investments: &dyn InvestmentSource,
) -> DashboardState {
    let result = futures::try_join!(
        dashboard.summary(),
        transactions.list(ListParams::default()),
        investments.performance(),
    );

    match result {
        Ok((summary, transactions, performance)) => {
            debug!(
                transactions = transactions.len(),
                "Dashboard data loaded"
            );
            DashboardState::Loaded(DashboardData {
                summary,
                transactions,
                performance,
            })
        }
        Err(e) => {
            error!(error = %e, "Error loading dashboard data");
            DashboardState::Failed(e)
        }
    }
}
