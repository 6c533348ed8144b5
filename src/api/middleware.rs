//! Request and response hooks applied by [`ApiClient`](super::ApiClient).
//!
//! Request middleware runs, in registration order, on every built request
//! before it is sent. Response middleware runs, in registration order, on
//! every response received; the first one to fail stops the chain.

use crate::core::error::{ApiError, Result};
use crate::store::TokenStore;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Request, Response, StatusCode};
use std::sync::Arc;
use tracing::{debug, error, warn};

pub const LOGIN_PATH: &str = "/login";

pub trait RequestMiddleware: Send + Sync {
    fn on_request(&self, request: Request) -> Request;
}

#[async_trait]
pub trait ResponseMiddleware: Send + Sync {
    async fn on_response(&self, response: Response) -> Result<Response>;
}

/// Called once for every response that invalidates the session.
pub trait SessionObserver: Send + Sync {
    fn session_invalidated(&self, login_path: &str);
}

impl<F> SessionObserver for F
where
    F: Fn(&str) + Send + Sync,
{
    fn session_invalidated(&self, login_path: &str) {
        self(login_path)
    }
}

/// Attaches `Authorization: Bearer <token>` when a credential is stored.
pub struct BearerAuth {
    store: Arc<dyn TokenStore>,
}

impl BearerAuth {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }
}

impl RequestMiddleware for BearerAuth {
    fn on_request(&self, mut request: Request) -> Request {
        let Some(credential) = self.store.get() else {
            return request;
        };
        match HeaderValue::from_str(&credential.bearer()) {
            Ok(mut value) => {
                value.set_sensitive(true);
                // insert replaces any existing value so the header appears once
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(e) => warn!("Stored credential is not a valid header value: {}", e),
        }
        request
    }
}

/// Clears the stored credential on 401 and reports the session as invalid.
pub struct SessionGuard {
    store: Arc<dyn TokenStore>,
    login_path: String,
    observers: Vec<Arc<dyn SessionObserver>>,
}

impl SessionGuard {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            store,
            login_path: LOGIN_PATH.to_string(),
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observers.push(observer);
        self
    }
}

#[async_trait]
impl ResponseMiddleware for SessionGuard {
    async fn on_response(&self, response: Response) -> Result<Response> {
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!(url = %response.url(), "Received 401, clearing credential");
        let store_error = match self.store.clear() {
            Ok(()) => None,
            Err(e) => {
                error!("Failed to clear credential after 401, it will be sent again: {}", e);
                Some(e.to_string())
            }
        };
        for observer in &self.observers {
            observer.session_invalidated(&self.login_path);
        }

        Err(ApiError::SessionInvalidated {
            login_path: self.login_path.clone(),
            store_error,
        })
    }
}

/// Rejects any non-success status, keeping the body for the caller.
pub struct StatusCheck;

#[async_trait]
impl ResponseMiddleware for StatusCheck {
    async fn on_response(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        debug!(%status, %body, "Request failed");
        Err(ApiError::Status { status, body })
    }
}
