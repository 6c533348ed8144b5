use super::ApiClient;
use crate::core::error::Result;
use crate::core::models::{Holding, InvestmentPerformance, NewHolding};
use crate::core::source::InvestmentSource;
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;
use tracing::instrument;

pub struct InvestmentsApi {
    client: Arc<ApiClient>,
}

impl InvestmentsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn holdings(&self) -> Result<Vec<Holding>> {
        self.client.get("/api/investments/").await
    }

    #[instrument(name = "InvestmentsAdd", skip(self))]
    pub async fn add_holding(&self, holding: &NewHolding) -> Result<Holding> {
        let builder = self
            .client
            .request(Method::POST, "/api/investments/")
            .json(holding);
        self.client.fetch(builder).await
    }

    #[instrument(name = "InvestmentsRemove", skip(self))]
    pub async fn remove_holding(&self, id: i64) -> Result<()> {
        let builder = self
            .client
            .request(Method::DELETE, &format!("/api/investments/{id}"));
        self.client.dispatch(builder).await?;
        Ok(())
    }
}

#[async_trait]
impl InvestmentSource for InvestmentsApi {
    #[instrument(name = "InvestmentsPerformance", skip(self))]
    async fn performance(&self) -> Result<InvestmentPerformance> {
        self.client.get("/api/investments/performance").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTokenStore;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MOCK_JSON: &str = r#"{
        "total_value": 12000.0,
        "total_cost_basis": 10000.0,
        "total_return": 2000.0,
        "total_return_percentage": 20.0,
        "time_weighted_return": 0.2,
        "sharpe_ratio": null,
        "asset_allocation": [
            {"ticker": "VTI", "value": 9000.0, "percentage": 75.0},
            {"ticker": "BND", "value": 3000.0, "percentage": 25.0}
        ]
    }"#;

    fn api(uri: &str) -> InvestmentsApi {
        let client = ApiClient::new(uri, Arc::new(MemoryTokenStore::new())).unwrap();
        InvestmentsApi::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_fetch_performance() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/investments/performance"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MOCK_JSON))
            .mount(&mock_server)
            .await;

        let perf = api(&mock_server.uri()).performance().await.unwrap();

        assert_eq!(perf.total_return_percentage, 20.0);
        assert!(perf.sharpe_ratio.is_none());
        assert_eq!(perf.asset_allocation[0].ticker, "VTI");
        assert_eq!(perf.asset_allocation[1].percentage, 25.0);
    }

    #[tokio::test]
    async fn test_holdings_lifecycle() {
        let mock_server = MockServer::start().await;
        let holding_json = r#"{"id": 5, "user_id": 1, "ticker_symbol": "VTI",
            "shares_owned": 10.0, "cost_basis": 200.0, "created_at": "2025-01-02T03:04:05"}"#;
        Mock::given(method("GET"))
            .and(path("/api/investments/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!("[{holding_json}]")))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/investments/"))
            .and(body_json(serde_json::json!({
                "ticker_symbol": "VTI",
                "shares_owned": 10.0,
                "cost_basis": 200.0
            })))
            .respond_with(ResponseTemplate::new(201).set_body_string(holding_json))
            .mount(&mock_server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/investments/5"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = api(&mock_server.uri());
        let added = api
            .add_holding(&NewHolding {
                ticker_symbol: "VTI".to_string(),
                shares_owned: 10.0,
                cost_basis: 200.0,
            })
            .await
            .unwrap();
        assert_eq!(added.id, 5);

        let holdings = api.holdings().await.unwrap();
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].ticker_symbol, "VTI");

        api.remove_holding(5).await.unwrap();
    }
}
