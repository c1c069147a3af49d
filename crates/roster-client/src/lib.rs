//! # roster-client
//!
//! Authenticated HTTP clients for the Roster REST API.
//!
//! One [`ApiClient`] holds the HTTP connection pool, the base URL, the session
//! token store and the application [`Navigator`]. It hands out a typed
//! [`ResourceClient`] per collection:
//! - `/api/departments`
//! - `/api/employees`
//! - `/api/courses`
//! - `/api/students`
//!
//! Every resource call attaches `Authorization: Bearer <token>`. A 403 from
//! any call redirects the application to the login route and still fails the
//! call. There are no retries.

pub mod mock;

mod error;
mod http;
mod resource;

pub use error::ClientError;
pub use resource::ResourceClient;

use std::sync::Arc;

use roster_auth::{AuthError, Credentials, TokenStore};
use roster_config::ApiConfig;
use roster_core::{
    Choice, Courses, Departments, Employees, Navigator, Record, Resource, ResourceKind, Students,
};

/// Shared handle to the remote API. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be constructed.
    pub fn new(
        config: &ApiConfig,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_http(
            builder.build()?,
            config.base(),
            tokens,
            navigator,
        ))
    }

    /// Wrap an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http(
        http: reqwest::Client,
        base_url: &str,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            tokens,
            navigator,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn http(&self) -> &reqwest::Client {
        &self.http
    }

    #[must_use]
    pub const fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    #[must_use]
    pub const fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    #[must_use]
    pub fn resource<R: Resource>(&self) -> ResourceClient<R> {
        ResourceClient::new(self.clone())
    }

    #[must_use]
    pub fn departments(&self) -> ResourceClient<Departments> {
        self.resource()
    }

    #[must_use]
    pub fn employees(&self) -> ResourceClient<Employees> {
        self.resource()
    }

    #[must_use]
    pub fn courses(&self) -> ResourceClient<Courses> {
        self.resource()
    }

    #[must_use]
    pub fn students(&self) -> ResourceClient<Students> {
        self.resource()
    }

    /// Exchange credentials for a token and store it in this client's session
    /// store. Subsequent resource calls carry the new token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for any failed exchange.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), AuthError> {
        roster_auth::login(
            &self.http,
            &self.base_url,
            credentials,
            self.tokens.as_ref(),
        )
        .await
    }

    /// First `size` records of `kind` as `(id, name)` pairs, for reference
    /// pickers.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the underlying list call fails.
    pub async fn choices(&self, kind: ResourceKind, size: u32) -> Result<Vec<Choice>, ClientError> {
        let choices = match kind {
            ResourceKind::Departments => to_choices(&self.departments().list(0, size).await?.content),
            ResourceKind::Employees => to_choices(&self.employees().list(0, size).await?.content),
            ResourceKind::Courses => to_choices(&self.courses().list(0, size).await?.content),
            ResourceKind::Students => to_choices(&self.students().list(0, size).await?.content),
        };
        Ok(choices)
    }
}

fn to_choices<E: Record>(records: &[E]) -> Vec<Choice> {
    records.iter().map(Choice::of).collect()
}

#[cfg(test)]
mod tests {
    use roster_auth::MemoryTokenStore;
    use roster_core::Route;

    use super::*;

    struct NoopNavigator;

    impl Navigator for NoopNavigator {
        fn navigate(&self, _route: Route) {}
    }

    fn client(base: &str) -> ApiClient {
        ApiClient::with_http(
            reqwest::Client::new(),
            base,
            Arc::new(MemoryTokenStore::new()),
            Arc::new(NoopNavigator),
        )
    }

    #[test]
    fn collection_urls_follow_resource_paths() {
        let api = client("http://localhost:8080/");
        assert_eq!(api.base_url(), "http://localhost:8080");
        assert_eq!(
            api.departments().collection_url(),
            "http://localhost:8080/api/departments"
        );
        assert_eq!(
            api.employees().collection_url(),
            "http://localhost:8080/api/employees"
        );
        assert_eq!(
            api.courses().collection_url(),
            "http://localhost:8080/api/courses"
        );
        assert_eq!(
            api.students().collection_url(),
            "http://localhost:8080/api/students"
        );
    }

    #[test]
    fn builds_from_config() {
        let config = ApiConfig {
            timeout_secs: Some(5),
            ..ApiConfig::default()
        };
        let api = ApiClient::new(
            &config,
            Arc::new(MemoryTokenStore::new()),
            Arc::new(NoopNavigator),
        )
        .expect("client should build");
        assert_eq!(api.base_url(), "http://localhost:8080");
    }

    #[tokio::test]
    async fn zero_page_size_is_rejected_locally() {
        // Nothing listens on this port; the call must fail before connecting.
        let api = client("http://127.0.0.1:9");
        let err = api.courses().list(0, 0).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }
}
