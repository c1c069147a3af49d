use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use roster_config::AuthConfig;

use crate::error::AuthError;

/// Fixed key the token is stored under.
const KEYRING_USER: &str = "token";
const TOKEN_ENV: &str = "ROSTER_AUTH__TOKEN";

/// Process-wide holder of the current bearer token.
///
/// Written once by the login flow, read by every resource client before each
/// request. There is no expiry or revocation.
pub trait TokenStore: Send + Sync {
    fn token(&self) -> Option<String>;

    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the token cannot be persisted.
    fn set_token(&self, token: &str) -> Result<(), AuthError>;
}

/// Which tier a stored token was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSource {
    Keyring,
    Env,
    File,
}

/// Token store that survives restarts.
///
/// Load priority: token set in this process -> keyring ->
/// `ROSTER_AUTH__TOKEN` env -> credentials file.
/// Writes go to the keyring and fall back to the file when the keyring is
/// unavailable. A file fallback removes any keyring entry so the old token
/// cannot shadow the new one on the next run.
#[derive(Debug)]
pub struct PersistentTokenStore {
    keyring_service: Option<String>,
    credentials_path: Option<PathBuf>,
    session: RwLock<Option<String>>,
}

impl PersistentTokenStore {
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            keyring_service: Some(config.keyring_service.clone()),
            credentials_path: config.credentials_path(),
            session: RwLock::new(None),
        }
    }

    /// A store that skips the keyring and only uses `path`.
    #[must_use]
    pub fn file_only(path: impl Into<PathBuf>) -> Self {
        Self {
            keyring_service: None,
            credentials_path: Some(path.into()),
            session: RwLock::new(None),
        }
    }

    /// Detect which tier the current token comes from (for status display).
    #[must_use]
    pub fn detect_source(&self) -> Option<TokenSource> {
        if self.load_keyring().is_some() {
            return Some(TokenSource::Keyring);
        }
        if load_env().is_some() {
            return Some(TokenSource::Env);
        }
        if self.load_file().is_some() {
            return Some(TokenSource::File);
        }
        None
    }

    fn entry(&self) -> Option<keyring::Entry> {
        let service = self.keyring_service.as_deref()?;
        match keyring::Entry::new(service, KEYRING_USER) {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::debug!(%error, "keyring entry unavailable");
                None
            }
        }
    }

    fn load_keyring(&self) -> Option<String> {
        self.entry()
            .and_then(|entry| entry.get_password().ok())
            .filter(|token| !token.is_empty())
    }

    fn load_file(&self) -> Option<String> {
        let path = self.credentials_path.as_deref()?;
        fs::read_to_string(path)
            .ok()
            .map(|content| content.trim().to_string())
            .filter(|token| !token.is_empty())
    }

    fn store_file(&self, token: &str, stale: Option<&keyring::Entry>) -> Result<(), AuthError> {
        let path = self.credentials_path.as_deref().ok_or_else(|| {
            AuthError::TokenStoreError("home directory not found, cannot store credentials".into())
        })?;
        write_private(path, token)?;

        if let Some(entry) = stale {
            match entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => {}
                Err(error) => tracing::warn!(%error, "failed to remove stale keyring token"),
            }
        }
        Ok(())
    }

    fn remember(&self, token: &str) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    fn session_token(&self) -> Option<String> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TokenStore for PersistentTokenStore {
    fn token(&self) -> Option<String> {
        self.session_token()
            .or_else(|| self.load_keyring())
            .or_else(load_env)
            .or_else(|| self.load_file())
    }

    fn set_token(&self, token: &str) -> Result<(), AuthError> {
        match self.entry() {
            None => self.store_file(token, None)?,
            Some(entry) => {
                if let Err(error) = entry.set_password(token) {
                    tracing::warn!(%error, "keyring store failed; falling back to file");
                    self.store_file(token, Some(&entry))?;
                }
            }
        }
        if load_env().is_some() {
            tracing::warn!("{TOKEN_ENV} is set and overrides the stored token in later runs");
        }
        self.remember(token);
        Ok(())
    }
}

/// Token store held only in memory, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_token(&self, token: &str) -> Result<(), AuthError> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }
}

fn load_env() -> Option<String> {
    std::env::var(TOKEN_ENV).ok().filter(|token| !token.is_empty())
}

fn write_private(path: &Path, token: &str) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(path, token)
        .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::TokenStoreError(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_roundtrip() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = PersistentTokenStore::file_only(tmp.path().join("nested").join("credentials"));

        store.set_token("tok_abc123").expect("store");
        assert_eq!(store.load_file().as_deref(), Some("tok_abc123"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(tmp.path().join("nested").join("credentials"))
                .expect("metadata")
                .permissions()
                .mode()
                & 0o777;
            assert_eq!(mode, 0o600, "credentials file should be 0600");
        }
    }

    #[test]
    fn set_token_overwrites_previous_value() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = PersistentTokenStore::file_only(tmp.path().join("credentials"));

        store.set_token("first").expect("store");
        store.set_token("second").expect("store");
        assert_eq!(store.load_file().as_deref(), Some("second"));
    }

    #[test]
    fn fresh_token_wins_over_env_override() {
        figment::Jail::expect_with(|jail| {
            jail.set_env(TOKEN_ENV, "stale-env-token");
            let store = PersistentTokenStore::file_only(jail.directory().join("credentials"));
            assert_eq!(store.token().as_deref(), Some("stale-env-token"));

            store.set_token("fresh-login-token").expect("store");
            assert_eq!(store.token().as_deref(), Some("fresh-login-token"));
            assert_eq!(store.load_file().as_deref(), Some("fresh-login-token"));
            Ok(())
        });
    }

    #[test]
    fn fresh_token_wins_over_older_file() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("credentials");
        std::fs::write(&path, "old-token").expect("write");

        let store = PersistentTokenStore::file_only(&path);
        store.set_token("new-token").expect("store");
        assert_eq!(store.token().as_deref(), Some("new-token"));
    }

    #[test]
    fn whitespace_only_file_is_no_token() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("credentials");
        std::fs::write(&path, "  \n ").expect("write");

        let store = PersistentTokenStore::file_only(&path);
        assert!(store.load_file().is_none());
    }

    #[test]
    fn missing_file_is_no_token() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = PersistentTokenStore::file_only(tmp.path().join("absent"));
        assert!(store.load_file().is_none());
    }

    #[test]
    fn memory_store_starts_empty() {
        let store = MemoryTokenStore::new();
        assert!(store.token().is_none());
        store.set_token("abc").expect("set");
        assert_eq!(store.token().as_deref(), Some("abc"));
    }

    #[test]
    fn memory_store_with_token() {
        let store = MemoryTokenStore::with_token("seeded");
        assert_eq!(store.token().as_deref(), Some("seeded"));
    }
}
