use roster_auth::{AuthError, Credentials};
use roster_client::ApiClient;
use roster_core::Route;

/// The `/login` screen: one form, one generic failure message.
pub struct LoginScreen {
    api: ApiClient,
    username: String,
    error: Option<String>,
}

impl LoginScreen {
    #[must_use]
    pub fn new(api: &ApiClient) -> Self {
        Self {
            api: api.clone(),
            username: String::new(),
            error: None,
        }
    }

    /// Username of the last attempt.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Authenticate, store the token and navigate to [`Route::DEFAULT`].
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] on failure; the screen then shows
    /// `Invalid username or password` and stays put.
    pub async fn submit(&mut self, credentials: &Credentials) -> Result<(), AuthError> {
        self.username.clone_from(&credentials.username);
        match self.api.login(credentials).await {
            Ok(()) => {
                self.error = None;
                self.api.navigator().navigate(Route::DEFAULT);
                Ok(())
            }
            Err(error) => {
                self.error = Some(AuthError::InvalidCredentials.to_string());
                Err(error)
            }
        }
    }
}
