//! HTTP client for the ExpenseShare backend
//!
//! Every endpoint follows the same convention: a non-2xx response carries a
//! plain-text error message, and a successful response only has a payload
//! when it is labelled as JSON.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::application::{AppError, AppResult};
use crate::domain::{Expense, User, UserId};

use super::{LoginRequest, NewExpense, RegisterRequest};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8081/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const UNKNOWN_SERVER_ERROR: &str = "An unknown server error occurred";

/// Connection settings for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// API client for the ExpenseShare backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> AppResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> AppResult<Option<T>> {
        tracing::debug!(endpoint, "POST");
        let response = self.client.post(self.url(endpoint)).json(body).send().await?;
        handle_response(response).await
    }

    /// Create a new account.
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<Option<User>> {
        self.post("/register", request).await
    }

    /// Sign in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        self.post("/login", &LoginRequest { email, password }).await
    }

    /// Fetch every expense the given user takes part in.
    pub async fn list_expenses(&self, user_id: UserId) -> AppResult<Option<Vec<Expense>>> {
        tracing::debug!(user_id, "GET /expenses");
        let response = self
            .client
            .get(self.url("/expenses"))
            .query(&[("userId", user_id)])
            .send()
            .await?;
        handle_response(response).await
    }

    /// Record a new expense; the backend computes the split.
    pub async fn create_expense(&self, expense: &NewExpense) -> AppResult<Option<Expense>> {
        self.post("/expenses", expense).await
    }
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> AppResult<Option<T>> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = response.text().await?;

    interpret_response(status, content_type.as_deref(), &body)
}

/// Map a raw response onto the backend's conventions.
pub fn interpret_response<T: DeserializeOwned>(
    status: StatusCode,
    content_type: Option<&str>,
    body: &str,
) -> AppResult<Option<T>> {
    if !status.is_success() {
        tracing::debug!(%status, "request failed");
        return Err(AppError::Server(if body.is_empty() {
            UNKNOWN_SERVER_ERROR.to_string()
        } else {
            body.to_string()
        }));
    }

    match content_type {
        Some(ct) if ct.contains("application/json") => Ok(Some(serde_json::from_str(body)?)),
        _ => Ok(None),
    }
}
