use roster_auth::{PersistentTokenStore, TokenSource};
use roster_config::RosterConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    token_source: Option<TokenSource>,
    base_url: String,
    note: Option<String>,
}

/// Report whether a token is stored. The token itself is never printed and
/// is not checked against the server.
pub fn handle(flags: &GlobalFlags, config: &RosterConfig) -> anyhow::Result<()> {
    let source = PersistentTokenStore::from_config(&config.auth).detect_source();
    output(
        &AuthStatusResponse {
            authenticated: source.is_some(),
            token_source: source,
            base_url: config.api.base().to_string(),
            note: source
                .is_none()
                .then(|| "no token stored; run `roster auth login <username>`".to_string()),
        },
        flags.format,
    )
}
