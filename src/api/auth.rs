use super::ApiClient;
use crate::core::error::Result;
use crate::core::models::{AuthToken, RegisteredUser, Registration};
use crate::store::Credential;
use reqwest::Method;
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Exchanges credentials for a bearer token and stores it.
    ///
    /// Fields are sent form-encoded, as OAuth2 password-flow token endpoints
    /// expect, not as JSON.
    #[instrument(name = "AuthLogin", skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthToken> {
        let builder = self
            .client
            .request(Method::POST, "/api/auth/login")
            .form(&[("username", username), ("password", password)]);
        let token: AuthToken = self.client.fetch(builder).await?;

        self.client
            .token_store()
            .set(Credential::new(token.access_token.clone()))?;
        debug!(token_type = %token.token_type, "Stored access token");
        Ok(token)
    }

    #[instrument(name = "AuthRegister", skip(self, password))]
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        currency_preference: Option<&str>,
    ) -> Result<RegisteredUser> {
        let builder = self
            .client
            .request(Method::POST, "/api/auth/register")
            .json(&Registration {
                username,
                password,
                currency_preference,
            });
        self.client.fetch(builder).await
    }

    /// Forgets the stored credential. The service keeps no session state.
    pub fn logout(&self) -> Result<()> {
        self.client.token_store().clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryTokenStore, TokenStore};
    use wiremock::matchers::{body_json, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api(uri: &str, store: Arc<MemoryTokenStore>) -> AuthApi {
        AuthApi::new(Arc::new(ApiClient::new(uri, store).unwrap()))
    }

    #[tokio::test]
    async fn test_login_sends_form_and_stores_token() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("username=alice"))
            .and(body_string_contains("password=s3cret%21"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"access_token": "jwt-abc", "token_type": "bearer"}"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = Arc::new(MemoryTokenStore::new());
        let token = api(&mock_server.uri(), store.clone())
            .login("alice", "s3cret!")
            .await
            .unwrap();

        assert_eq!(token.access_token, "jwt-abc");
        assert_eq!(store.get(), Some(Credential::new("jwt-abc")));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_store_empty() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string(r#"{"detail": "Incorrect username or password"}"#),
            )
            .mount(&mock_server)
            .await;

        let store = Arc::new(MemoryTokenStore::new());
        let err = api(&mock_server.uri(), store.clone())
            .login("alice", "wrong")
            .await
            .unwrap_err();

        assert!(err.is_session_invalidated());
        assert!(store.get().is_none());
    }

    #[tokio::test]
    async fn test_register_sends_json() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .and(body_json(serde_json::json!({
                "username": "bob",
                "password": "longpassword",
                "currency_preference": "EUR"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_string(
                r#"{"id": 3, "username": "bob", "currency_preference": "EUR"}"#,
            ))
            .mount(&mock_server)
            .await;

        let user = api(&mock_server.uri(), Arc::new(MemoryTokenStore::new()))
            .register("bob", "longpassword", Some("EUR"))
            .await
            .unwrap();

        assert_eq!(user.id, 3);
        assert_eq!(user.currency_preference, "EUR");
    }

    #[test]
    fn test_logout_clears_store() {
        let store = Arc::new(MemoryTokenStore::with_credential(Credential::new("abc")));
        let auth = api("http://localhost:8000", store.clone());
        auth.logout().unwrap();
        assert!(store.get().is_none());
    }
}
