use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Any failed `/authenticate` exchange. Wrong credentials, transport
    /// failures and malformed responses are deliberately indistinguishable.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("token store error: {0}")]
    TokenStoreError(String),
}
