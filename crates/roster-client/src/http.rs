//! Shared request/response helpers for resource clients.
//!
//! Centralizes bearer attachment and the status-code rules: 403 requests
//! navigation to the login route and still fails the call; any other
//! non-success status becomes [`ClientError::Api`].

use roster_auth::TokenStore;
use roster_core::{Navigator, Route};

use crate::error::ClientError;

/// `Authorization` header value for the current token.
///
/// A missing token yields `"Bearer "`; absence is only discovered through
/// the server's 403.
pub fn bearer(tokens: &dyn TokenStore) -> String {
    format!("Bearer {}", tokens.token().unwrap_or_default())
}

/// Check an HTTP response for error statuses.
///
/// Returns the response unchanged on success. Handles:
/// - **403 Forbidden** -> navigates to [`Route::Login`] once, then
///   [`ClientError::Forbidden`].
/// - **Other non-success status** -> [`ClientError::Api`] with status code
///   and response body.
pub async fn check_response(
    resp: reqwest::Response,
    navigator: &dyn Navigator,
) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status == reqwest::StatusCode::FORBIDDEN {
        tracing::warn!(url = %resp.url(), "request forbidden; redirecting to login");
        navigator.navigate(Route::Login);
        return Err(ClientError::Forbidden);
    }
    if !status.is_success() {
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use roster_auth::MemoryTokenStore;

    use super::*;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Route>>);

    impl Navigator for Recorder {
        fn navigate(&self, route: Route) {
            self.0.lock().unwrap().push(route);
        }
    }

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[test]
    fn bearer_uses_stored_token() {
        let tokens = MemoryTokenStore::with_token("abc");
        assert_eq!(bearer(&tokens), "Bearer abc");
    }

    #[test]
    fn bearer_without_token_is_empty() {
        let tokens = MemoryTokenStore::new();
        assert_eq!(bearer(&tokens), "Bearer ");
    }

    #[tokio::test]
    async fn forbidden_navigates_once_and_fails() {
        let navigator = Recorder::default();
        let err = check_response(mock_response(403, ""), &navigator)
            .await
            .unwrap_err();

        assert!(err.is_forbidden());
        assert_eq!(*navigator.0.lock().unwrap(), vec![Route::Login]);
    }

    #[tokio::test]
    async fn server_error_keeps_body_and_does_not_navigate() {
        let navigator = Recorder::default();
        let err = check_response(mock_response(500, "boom"), &navigator)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClientError::Api { status: 500, ref message } if message == "boom"
        ));
        assert!(navigator.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unauthorized_is_not_treated_as_forbidden() {
        let navigator = Recorder::default();
        let err = check_response(mock_response(401, ""), &navigator)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Api { status: 401, .. }));
        assert!(navigator.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn success_passes_through() {
        let navigator = Recorder::default();
        assert!(check_response(mock_response(204, ""), &navigator).await.is_ok());
        assert!(navigator.0.lock().unwrap().is_empty());
    }
}
