//! API client for communicating with the authentication service.
//!
//! This module provides the `ApiClient` struct for registration, login,
//! and profile requests. The client reads the token store before every
//! request and attaches a bearer header when a token is present; it
//! never interprets responses beyond status and JSON decode, and never
//! retries.

use std::sync::Arc;

use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::TokenStore;
use crate::models::UserProfile;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Registration request body
#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Login request body. The service requires a `username` field on login
/// even though only email and password identify the account; it is sent
/// with a fixed placeholder value and ignored server-side.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Placeholder for the unused login `username` field
const LOGIN_USERNAME_PLACEHOLDER: &str = "string";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
}

/// API client for the authentication service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection
/// pooling, and the token store is shared behind an Arc.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a new API client against the given base URL
    pub fn new(base_url: String, store: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url,
            store,
        })
    }

    /// Build a request against the base URL, attaching the bearer token
    /// if one is currently stored
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);
        if let Some(token) = self.store.read() {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Check if response is successful, returning an error carrying the
    /// parsed error body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Register a new account. Success is any 2xx; the response body is
    /// not used.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        debug!(username, email, "Submitting registration");
        let body = RegisterRequest {
            username,
            email,
            password,
        };
        let response = self
            .request(Method::POST, "/users/register")
            .json(&body)
            .send()
            .await?;
        Self::check_response(response).await?;
        Ok(())
    }

    /// Log in and return the issued access token
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        debug!(email, "Submitting login");
        let body = LoginRequest {
            username: LOGIN_USERNAME_PLACEHOLDER,
            email,
            password,
        };
        let response = self
            .request(Method::POST, "/users/login")
            .json(&body)
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Bad login response: {}", e)))?;
        Ok(login.access_token)
    }

    /// Fetch the current user's profile. Requires a stored token; the
    /// bearer header is attached automatically.
    pub async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        let response = self.request(Method::GET, "/users/me").send().await?;
        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Bad profile response: {}", e)))
    }
}
