//! # roster-auth
//!
//! Session handling for the Roster console.
//!
//! Provides the process-wide session token store ([`TokenStore`]) with an OS
//! keychain backed implementation that survives restarts, plus the login
//! exchange against the API's `/authenticate` endpoint.

pub mod error;
pub mod login;
pub mod token_store;

pub use error::AuthError;
pub use login::{Credentials, authenticate, login};
pub use token_store::{MemoryTokenStore, PersistentTokenStore, TokenSource, TokenStore};
