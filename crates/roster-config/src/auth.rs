//! Session token storage settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_keyring_service() -> String {
    "roster-console".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// OS keychain service name the token is stored under.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,

    /// Override for the fallback credentials file (`~/.roster/credentials`).
    #[serde(default)]
    pub credentials_file: Option<PathBuf>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            keyring_service: default_keyring_service(),
            credentials_file: None,
        }
    }
}

impl AuthConfig {
    /// Resolved credentials file path, `None` if no home directory exists.
    #[must_use]
    pub fn credentials_path(&self) -> Option<PathBuf> {
        self.credentials_file
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(".roster").join("credentials")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_is_under_home() {
        let config = AuthConfig::default();
        assert_eq!(config.keyring_service, "roster-console");
        if let Some(path) = config.credentials_path() {
            assert!(path.ends_with(".roster/credentials"));
        }
    }

    #[test]
    fn explicit_file_wins() {
        let config = AuthConfig {
            credentials_file: Some(PathBuf::from("/tmp/roster-token")),
            ..Default::default()
        };
        assert_eq!(
            config.credentials_path(),
            Some(PathBuf::from("/tmp/roster-token"))
        );
    }
}
