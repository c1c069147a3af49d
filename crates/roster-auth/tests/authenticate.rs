//! Login exchange against a one-shot local HTTP server.

use std::io::Read;
use std::thread::JoinHandle;

use pretty_assertions::assert_eq;
use roster_auth::{AuthError, Credentials, MemoryTokenStore, TokenStore, authenticate, login};

struct Captured {
    method: String,
    url: String,
    authorization: Option<String>,
    body: serde_json::Value,
}

/// Answer exactly one request with `status` and `body`, returning what the
/// client sent.
fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<Captured>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind");
    let port = server.server_addr().to_ip().expect("tcp listener").port();

    let handle = std::thread::spawn(move || {
        let mut request = server.recv().expect("request");
        let mut raw = String::new();
        request
            .as_reader()
            .read_to_string(&mut raw)
            .expect("request body");
        let captured = Captured {
            method: request.method().to_string(),
            url: request.url().to_string(),
            authorization: request
                .headers()
                .iter()
                .find(|header| header.field.equiv("Authorization"))
                .map(|header| header.value.to_string()),
            body: serde_json::from_str(&raw).unwrap_or(serde_json::Value::Null),
        };
        let response = tiny_http::Response::from_string(body).with_status_code(status);
        request.respond(response).expect("respond");
        captured
    });

    (format!("http://127.0.0.1:{port}"), handle)
}

#[tokio::test]
async fn successful_login_stores_token() {
    let (base, server) = serve_once(200, r#"{"token": "jwt-123"}"#);
    let store = MemoryTokenStore::new();
    let http = reqwest::Client::new();

    login(&http, &base, &Credentials::new("admin", "secret"), &store)
        .await
        .expect("login should succeed");

    assert_eq!(store.token().as_deref(), Some("jwt-123"));

    let captured = server.join().expect("server thread");
    assert_eq!(captured.method, "POST");
    assert_eq!(captured.url, "/authenticate");
    assert!(captured.authorization.is_none(), "login must not send a bearer");
    assert_eq!(
        captured.body,
        serde_json::json!({"username": "admin", "password": "secret"})
    );
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_tolerated() {
    let (base, server) = serve_once(200, r#"{"token": "t"}"#);
    let http = reqwest::Client::new();

    let token = authenticate(&http, &format!("{base}/"), &Credentials::new("a", "b"))
        .await
        .expect("authenticate");
    assert_eq!(token, "t");
    assert_eq!(server.join().expect("server thread").url, "/authenticate");
}

#[tokio::test]
async fn rejected_credentials_give_generic_error() {
    let (base, server) = serve_once(401, r#"{"error": "bad credentials"}"#);
    let store = MemoryTokenStore::new();
    let http = reqwest::Client::new();

    let err = login(&http, &base, &Credentials::new("admin", "wrong"), &store)
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(err.to_string(), "Invalid username or password");
    assert!(store.token().is_none(), "failed login must not store a token");
    server.join().expect("server thread");
}

#[tokio::test]
async fn body_without_token_is_a_failed_login() {
    let (base, server) = serve_once(200, r#"{"message": "ok"}"#);
    let http = reqwest::Client::new();

    let err = authenticate(&http, &base, &Credentials::new("a", "b"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    server.join().expect("server thread");
}

#[tokio::test]
async fn unreachable_server_gives_same_generic_error() {
    let port = {
        let listener = tiny_http::Server::http("127.0.0.1:0").expect("bind");
        listener.server_addr().to_ip().expect("tcp listener").port()
    };
    let http = reqwest::Client::new();

    let err = authenticate(
        &http,
        &format!("http://127.0.0.1:{port}"),
        &Credentials::new("a", "b"),
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "Invalid username or password");
}
