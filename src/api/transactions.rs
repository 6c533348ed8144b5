use super::ApiClient;
use crate::core::error::Result;
use crate::core::models::{NewTransaction, Transaction};
use crate::core::source::TransactionSource;
use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use std::sync::Arc;
use tracing::instrument;

pub use crate::core::source::ListParams;

pub struct TransactionsApi {
    client: Arc<ApiClient>,
}

impl TransactionsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Uploads a CSV export as the multipart `file` field.
    ///
    /// Without `account_id` the service books the rows against the user's
    /// first account.
    #[instrument(name = "TransactionsUpload", skip(self, contents), fields(bytes = contents.len()))]
    pub async fn upload_csv(
        &self,
        file_name: &str,
        contents: Vec<u8>,
        account_id: Option<i64>,
    ) -> Result<Vec<Transaction>> {
        let part = Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str("text/csv")?;
        let mut builder = self
            .client
            .request(Method::POST, "/api/transactions/upload")
            .multipart(Form::new().part("file", part));
        if let Some(id) = account_id {
            builder = builder.query(&[("account_id", id)]);
        }
        self.client.fetch(builder).await
    }

    #[instrument(name = "TransactionsCreate", skip(self))]
    pub async fn create(&self, transaction: &NewTransaction) -> Result<Transaction> {
        let builder = self
            .client
            .request(Method::POST, "/api/transactions/")
            .json(transaction);
        self.client.fetch(builder).await
    }

    #[instrument(name = "TransactionsDelete", skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let builder = self
            .client
            .request(Method::DELETE, &format!("/api/transactions/{id}"));
        self.client.dispatch(builder).await?;
        Ok(())
    }
}

#[async_trait]
impl TransactionSource for TransactionsApi {
    #[instrument(name = "TransactionsList", skip(self))]
    async fn list(&self, params: ListParams) -> Result<Vec<Transaction>> {
        let builder = self
            .client
            .request(Method::GET, "/api/transactions/")
            .query(&params);
        self.client.fetch(builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ApiError;
    use crate::store::MemoryTokenStore;
    use reqwest::StatusCode;
    use wiremock::matchers::{body_string_contains, header_regex, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MOCK_JSON: &str = r#"[
        {"id": 2, "account_id": 1, "amount": -12.5, "category": "food",
         "description": "Lunch", "timestamp": "2025-06-02T12:00:00"},
        {"id": 1, "account_id": 1, "amount": 3000.0, "category": "salary",
         "description": null, "timestamp": "2025-06-01T09:00:00"}
    ]"#;

    fn api(uri: &str) -> TransactionsApi {
        let client = ApiClient::new(uri, Arc::new(MemoryTokenStore::new())).unwrap();
        TransactionsApi::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_list_with_default_params() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/transactions/"))
            .and(query_param("skip", "0"))
            .and(query_param("limit", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MOCK_JSON))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transactions = api(&mock_server.uri())
            .list(ListParams::default())
            .await
            .unwrap();

        // Service order is kept
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].id, 2);
        assert_eq!(transactions[1].id, 1);

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.path(), "/api/transactions/");
        assert_eq!(requests[0].url.query(), Some("skip=0&limit=100"));
    }

    #[tokio::test]
    async fn test_list_with_custom_window() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/transactions/"))
            .and(query_param("skip", "20"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transactions = api(&mock_server.uri())
            .list(ListParams { skip: 20, limit: 10 })
            .await
            .unwrap();
        assert!(transactions.is_empty());
    }

    #[tokio::test]
    async fn test_upload_csv_as_multipart() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/transactions/upload"))
            .and(query_param("account_id", "4"))
            .and(header_regex("content-type", "^multipart/form-data; boundary="))
            .and(body_string_contains("name=\"file\"; filename=\"june.csv\""))
            .and(body_string_contains("amount,category"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MOCK_JSON))
            .expect(1)
            .mount(&mock_server)
            .await;

        let created = api(&mock_server.uri())
            .upload_csv("june.csv", b"amount,category\n-12.5,food\n".to_vec(), Some(4))
            .await
            .unwrap();
        assert_eq!(created.len(), 2);
    }

    #[tokio::test]
    async fn test_upload_without_account_omits_query() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/transactions/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&mock_server)
            .await;

        api(&mock_server.uri())
            .upload_csv("empty.csv", b"amount,category\n".to_vec(), None)
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert!(requests[0].url.query().is_none());
    }

    #[tokio::test]
    async fn test_upload_rejected_by_service() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/transactions/upload"))
            .respond_with(ResponseTemplate::new(400).set_body_string(
                r#"{"detail": "CSV must contain columns: amount, category"}"#,
            ))
            .mount(&mock_server)
            .await;

        let err = api(&mock_server.uri())
            .upload_csv("bad.csv", b"foo,bar\n".to_vec(), None)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert!(matches!(err, ApiError::Status { .. }));
    }

    #[tokio::test]
    async fn test_create_and_delete() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/transactions/"))
            .respond_with(ResponseTemplate::new(201).set_body_string(
                r#"{"id": 9, "account_id": 1, "amount": -40.0, "category": "shopping",
                    "description": "Books", "timestamp": "2025-06-03T10:00:00"}"#,
            ))
            .mount(&mock_server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/transactions/9"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = api(&mock_server.uri());
        let created = api
            .create(&NewTransaction {
                account_id: 1,
                amount: -40.0,
                category: "shopping".to_string(),
                description: Some("Books".to_string()),
                timestamp: None,
            })
            .await
            .unwrap();
        assert_eq!(created.id, 9);

        api.delete(created.id).await.unwrap();
    }
}
