use std::io::BufRead;

use anyhow::Context;
use roster_auth::Credentials;
use roster_config::RosterConfig;
use serde::Serialize;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::output::output;

const PASSWORD_ENV: &str = "ROSTER_PASSWORD";

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    username: String,
    base_url: String,
}

pub async fn handle(
    args: &AuthLoginArgs,
    flags: &GlobalFlags,
    config: &RosterConfig,
) -> anyhow::Result<()> {
    let password = resolve_password(args.password.as_deref())?;
    let api = bootstrap::api_client(config)?;

    api.login(&Credentials::new(&args.username, password))
        .await?;

    output(
        &AuthLoginResponse {
            authenticated: true,
            username: args.username.clone(),
            base_url: api.base_url().to_string(),
        },
        flags.format,
    )
}

/// Priority: `--password` -> `ROSTER_PASSWORD` -> one line from stdin.
fn resolve_password(flag: Option<&str>) -> anyhow::Result<String> {
    if let Some(password) = flag {
        return Ok(password.to_string());
    }
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(password);
    }
    eprint!("password: ");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
