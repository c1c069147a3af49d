use std::sync::Arc;

use anyhow::Context;
use roster_auth::{PersistentTokenStore, TokenStore};
use roster_client::ApiClient;
use roster_config::RosterConfig;
use roster_core::{Navigator, Route};

use crate::cli::GlobalFlags;

/// Load `.env`, layered config and the `--base-url` override.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<RosterConfig> {
    if let Err(error) = dotenvy::dotenv()
        && !error.not_found()
    {
        return Err(error).context("failed to load .env");
    }

    let mut config = RosterConfig::load().context("failed to load roster configuration")?;
    if let Some(base_url) = &flags.base_url {
        config.api.base_url.clone_from(base_url);
        config
            .validate()
            .context("invalid --base-url")?;
    }
    Ok(config)
}

/// Session store backed by the keyring, `ROSTER_AUTH__TOKEN` or the
/// credentials file.
pub fn token_store(config: &RosterConfig) -> Arc<dyn TokenStore> {
    Arc::new(PersistentTokenStore::from_config(&config.auth))
}

/// One-shot commands have no screen to redirect; a 403 is reported as an
/// error after this hint.
struct CommandNavigator;

impl Navigator for CommandNavigator {
    fn navigate(&self, route: Route) {
        if route == Route::Login {
            tracing::warn!("session rejected by the server; run `roster auth login <username>`");
        }
    }
}

pub fn api_client(config: &RosterConfig) -> anyhow::Result<ApiClient> {
    ApiClient::new(&config.api, token_store(config), Arc::new(CommandNavigator))
        .context("failed to build HTTP client")
}
