use super::ApiClient;
use crate::core::error::Result;
use crate::core::models::DashboardSummary;
use crate::core::source::DashboardSource;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

pub struct DashboardApi {
    client: Arc<ApiClient>,
}

impl DashboardApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DashboardSource for DashboardApi {
    #[instrument(name = "DashboardSummary", skip(self))]
    async fn summary(&self) -> Result<DashboardSummary> {
        self.client.get("/api/dashboard/summary").await
    }
}
