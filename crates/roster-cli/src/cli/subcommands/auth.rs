use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Exchange username and password for a token and store it.
    Login(AuthLoginArgs),
    /// Show whether a token is stored and where it came from.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    /// Account name.
    pub username: String,
    /// Password. Falls back to `ROSTER_PASSWORD`, then one line of stdin.
    #[arg(long)]
    pub password: Option<String>,
}
