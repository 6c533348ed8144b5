use super::ApiClient;
use crate::core::error::Result;
use crate::core::models::{Account, AccountUpdate, NewAccount};
use reqwest::Method;
use std::sync::Arc;
use tracing::instrument;

pub struct AccountsApi {
    client: Arc<ApiClient>,
}

impl AccountsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Account>> {
        self.client.get("/api/accounts/").await
    }

    pub async fn get(&self, id: i64) -> Result<Account> {
        self.client.get(&format!("/api/accounts/{id}")).await
    }

    #[instrument(name = "AccountsCreate", skip(self))]
    pub async fn create(&self, account: &NewAccount) -> Result<Account> {
        let builder = self
            .client
            .request(Method::POST, "/api/accounts/")
            .json(account);
        self.client.fetch(builder).await
    }

    /// Only the fields set in `update` are sent.
    #[instrument(name = "AccountsUpdate", skip(self))]
    pub async fn update(&self, id: i64, update: &AccountUpdate) -> Result<Account> {
        let builder = self
            .client
            .request(Method::PATCH, &format!("/api/accounts/{id}"))
            .json(update);
        self.client.fetch(builder).await
    }
}
