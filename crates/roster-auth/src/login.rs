use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::token_store::TokenStore;

/// Username and password as typed; no format checks are applied.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// Exchange credentials for a bearer token via `POST {base_url}/authenticate`.
///
/// The request carries no `Authorization` header.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredentials`] for every failure: transport
/// errors, non-success statuses, and bodies without a non-empty `token`.
pub async fn authenticate(
    http: &reqwest::Client,
    base_url: &str,
    credentials: &Credentials,
) -> Result<String, AuthError> {
    let url = format!("{}/authenticate", base_url.trim_end_matches('/'));
    tracing::debug!(%url, username = %credentials.username, "authenticating");

    let resp = http
        .post(&url)
        .json(credentials)
        .send()
        .await
        .map_err(|error| {
            tracing::debug!(%error, "authenticate request failed");
            AuthError::InvalidCredentials
        })?;

    if !resp.status().is_success() {
        tracing::debug!(status = resp.status().as_u16(), "authenticate rejected");
        return Err(AuthError::InvalidCredentials);
    }

    let body: TokenResponse = resp.json().await.map_err(|error| {
        tracing::debug!(%error, "authenticate response unreadable");
        AuthError::InvalidCredentials
    })?;

    if body.token.is_empty() {
        return Err(AuthError::InvalidCredentials);
    }
    Ok(body.token)
}

/// Authenticate and write the token into `store`.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredentials`] if the exchange fails, or
/// [`AuthError::TokenStoreError`] if the token cannot be stored.
pub async fn login(
    http: &reqwest::Client,
    base_url: &str,
    credentials: &Credentials,
    store: &dyn TokenStore,
) -> Result<(), AuthError> {
    let token = authenticate(http, base_url, credentials).await?;
    store.set_token(&token)?;
    tracing::info!(username = %credentials.username, "logged in");
    Ok(())
}
