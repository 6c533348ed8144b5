//! Terminal front end over the API client.

pub mod accounts;
pub mod dashboard;
pub mod holdings;
pub mod session;
pub mod setup;
pub mod transactions;
pub mod ui;

use crate::api::{AccountsApi, ApiClient, AuthApi, DashboardApi, InvestmentsApi, TransactionsApi};
use crate::core::CurrencyFormat;
use crate::core::config::AppConfig;
use crate::store::TokenStore;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, warn};

/// Shared handles for one CLI invocation.
pub struct Context {
    client: Arc<ApiClient>,
    pub currency: CurrencyFormat,
}

impl Context {
    pub fn new(config: &AppConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
        let base_url = config.base_url();
        debug!(%base_url, "Creating API client");

        let client = ApiClient::builder(&base_url, store)
            .session_observer(Arc::new(|login_path: &str| {
                warn!(login_path = %login_path, "Session invalidated by the service");
            }))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            currency: CurrencyFormat::new(&config.currency),
        })
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(Arc::clone(&self.client))
    }

    pub fn dashboard(&self) -> DashboardApi {
        DashboardApi::new(Arc::clone(&self.client))
    }

    pub fn transactions(&self) -> TransactionsApi {
        TransactionsApi::new(Arc::clone(&self.client))
    }

    pub fn investments(&self) -> InvestmentsApi {
        InvestmentsApi::new(Arc::clone(&self.client))
    }

    pub fn accounts(&self) -> AccountsApi {
        AccountsApi::new(Arc::clone(&self.client))
    }
}
