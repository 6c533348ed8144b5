//! HTTP client for the finance service and its per-resource wrappers.

pub mod accounts;
pub mod auth;
pub mod dashboard;
pub mod investments;
pub mod middleware;
pub mod transactions;

pub use accounts::AccountsApi;
pub use auth::AuthApi;
pub use dashboard::DashboardApi;
pub use investments::InvestmentsApi;
pub use transactions::{ListParams, TransactionsApi};

use crate::core::error::{ApiError, Result};
use crate::store::TokenStore;
use middleware::{
    BearerAuth, RequestMiddleware, ResponseMiddleware, SessionGuard, SessionObserver, StatusCheck,
};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Single choke point for all calls to the service.
///
/// Requests pass through the request middleware before dispatch and responses
/// through the response middleware after; both in registration order. There
/// are no retries or timeouts here, callers own reliability.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    store: Arc<dyn TokenStore>,
    request_middleware: Vec<Arc<dyn RequestMiddleware>>,
    response_middleware: Vec<Arc<dyn ResponseMiddleware>>,
}

pub struct ApiClientBuilder {
    base_url: String,
    store: Arc<dyn TokenStore>,
    observers: Vec<Arc<dyn SessionObserver>>,
    request_middleware: Vec<Arc<dyn RequestMiddleware>>,
    response_middleware: Vec<Arc<dyn ResponseMiddleware>>,
}

impl ApiClientBuilder {
    /// Notified whenever a 401 invalidates the session.
    pub fn session_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Runs after the built-in bearer auth middleware.
    pub fn request_middleware(mut self, middleware: Arc<dyn RequestMiddleware>) -> Self {
        self.request_middleware.push(middleware);
        self
    }

    /// Runs after the built-in 401 and status checks.
    pub fn response_middleware(mut self, middleware: Arc<dyn ResponseMiddleware>) -> Self {
        self.response_middleware.push(middleware);
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| ApiError::Request(format!("Invalid base URL {base_url}: {e}")))?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("finboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let guard = self
            .observers
            .into_iter()
            .fold(SessionGuard::new(Arc::clone(&self.store)), |guard, observer| {
                guard.with_observer(observer)
            });

        let mut request_middleware: Vec<Arc<dyn RequestMiddleware>> =
            vec![Arc::new(BearerAuth::new(Arc::clone(&self.store)))];
        request_middleware.extend(self.request_middleware);

        let mut response_middleware: Vec<Arc<dyn ResponseMiddleware>> =
            vec![Arc::new(guard), Arc::new(StatusCheck)];
        response_middleware.extend(self.response_middleware);

        Ok(ApiClient {
            base_url,
            http,
            store: self.store,
            request_middleware,
            response_middleware,
        })
    }
}

impl ApiClient {
    pub fn builder(base_url: &str, store: Arc<dyn TokenStore>) -> ApiClientBuilder {
        ApiClientBuilder {
            base_url: base_url.to_string(),
            store,
            observers: Vec::new(),
            request_middleware: Vec::new(),
            response_middleware: Vec::new(),
        }
    }

    /// Client with the default middleware chain.
    pub fn new(base_url: &str, store: Arc<dyn TokenStore>) -> Result<Self> {
        Self::builder(base_url, store).build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    /// Sends a request through the middleware chain.
    #[instrument(name = "ApiDispatch", skip_all)]
    pub async fn dispatch(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build()?;
        let request = self
            .request_middleware
            .iter()
            .fold(request, |request, middleware| middleware.on_request(request));

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "Sending request");

        let mut response = self.http.execute(request).await?;
        debug!(%method, %url, status = %response.status(), "Received response");

        for middleware in &self.response_middleware {
            response = middleware.on_response(response).await?;
        }
        Ok(response)
    }

    /// Dispatches and decodes a JSON body.
    pub async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.dispatch(builder).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            debug!(
                error = ?e,
                body = %String::from_utf8_lossy(&bytes),
                "Failed to parse response"
            );
            ApiError::Decode(e)
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.fetch(self.request(Method::GET, path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Credential, MemoryTokenStore};
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_server(status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ping"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_attaches_bearer_header_once() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ping"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = Arc::new(MemoryTokenStore::with_credential(Credential::new("tok-1")));
        let client = ApiClient::new(&mock_server.uri(), store).unwrap();
        let _: serde_json::Value = client.get("/api/ping").await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].headers.get_all("authorization").iter().count(), 1);
    }

    #[tokio::test]
    async fn test_no_header_without_credential() {
        let mock_server = mock_server(200, "{}").await;
        let client = ApiClient::new(&mock_server.uri(), Arc::new(MemoryTokenStore::new())).unwrap();
        let _: serde_json::Value = client.get("/api/ping").await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_clears_credential_and_notifies_once() {
        let mock_server = mock_server(401, r#"{"detail": "Could not validate credentials"}"#).await;
        let store = Arc::new(MemoryTokenStore::with_credential(Credential::new("stale")));
        let notified = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&notified);

        let client = ApiClient::builder(&mock_server.uri(), store.clone())
            .session_observer(Arc::new(move |login_path: &str| {
                assert_eq!(login_path, "/login");
                seen.fetch_add(1, Ordering::SeqCst);
            }))
            .build()
            .unwrap();

        let err = client.get::<serde_json::Value>("/api/ping").await.unwrap_err();
        assert!(err.is_session_invalidated());
        assert!(store.get().is_none());
        assert_eq!(notified.load(Ordering::SeqCst), 1);
    }

    struct StuckStore;

    impl TokenStore for StuckStore {
        fn get(&self) -> Option<Credential> {
            Some(Credential::new("stuck"))
        }

        fn set(&self, _credential: Credential) -> Result<()> {
            Ok(())
        }

        fn clear(&self) -> Result<()> {
            Err(ApiError::Store("disk full".to_string()))
        }
    }

    #[tokio::test]
    async fn test_unauthorized_reports_failed_clear() {
        let mock_server = mock_server(401, "").await;
        let client = ApiClient::new(&mock_server.uri(), Arc::new(StuckStore)).unwrap();

        let err = client.get::<serde_json::Value>("/api/ping").await.unwrap_err();
        match err {
            ApiError::SessionInvalidated {
                login_path,
                store_error,
            } => {
                assert_eq!(login_path, "/login");
                assert!(store_error.unwrap().contains("disk full"));
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unauthorized_with_working_store_has_no_store_error() {
        let mock_server = mock_server(401, "").await;
        let store = Arc::new(MemoryTokenStore::with_credential(Credential::new("stale")));
        let client = ApiClient::new(&mock_server.uri(), store).unwrap();

        let err = client.get::<serde_json::Value>("/api/ping").await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::SessionInvalidated {
                store_error: None,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_other_errors_keep_credential() {
        for status in [400u16, 403, 404, 422, 500, 503] {
            let mock_server = mock_server(status, "boom").await;
            let store = Arc::new(MemoryTokenStore::with_credential(Credential::new("keep")));
            let client = ApiClient::new(&mock_server.uri(), store.clone()).unwrap();

            let err = client.get::<serde_json::Value>("/api/ping").await.unwrap_err();
            match err {
                ApiError::Status { status: s, body } => {
                    assert_eq!(s, StatusCode::from_u16(status).unwrap());
                    assert_eq!(body, "boom");
                }
                other => panic!("Unexpected error: {other:?}"),
            }
            assert_eq!(store.get(), Some(Credential::new("keep")));
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_propagated() {
        // Nothing listens on port 9 locally
        let store = Arc::new(MemoryTokenStore::with_credential(Credential::new("keep")));
        let client = ApiClient::new("http://127.0.0.1:9", store.clone()).unwrap();

        let err = client.get::<serde_json::Value>("/api/ping").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert!(store.get().is_some());
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let mock_server = mock_server(200, "not json").await;
        let client = ApiClient::new(&mock_server.uri(), Arc::new(MemoryTokenStore::new())).unwrap();

        let err = client.get::<serde_json::Value>("/api/ping").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ApiClient::new("not a url", Arc::new(MemoryTokenStore::new()));
        assert!(matches!(result, Err(ApiError::Request(_))));
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let mock_server = mock_server(200, "{}").await;
        let base_url = format!("{}/", mock_server.uri());
        let client = ApiClient::new(&base_url, Arc::new(MemoryTokenStore::new())).unwrap();
        let _: serde_json::Value = client.get("/api/ping").await.unwrap();
    }
}
