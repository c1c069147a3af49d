pub mod auth;
pub mod console;
pub mod resource;

use roster_config::RosterConfig;
use roster_core::ResourceKind;

use crate::cli::{Commands, GlobalFlags};

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: &Commands,
    flags: &GlobalFlags,
    config: &RosterConfig,
) -> anyhow::Result<()> {
    let (kind, action) = match command {
        Commands::Auth { action } => return auth::handle(action, flags, config).await,
        Commands::Console(args) => return console::handle(args, config).await,
        Commands::Department { action } => (ResourceKind::Departments, action),
        Commands::Employee { action } => (ResourceKind::Employees, action),
        Commands::Course { action } => (ResourceKind::Courses, action),
        Commands::Student { action } => (ResourceKind::Students, action),
    };
    resource::handle(kind, action, flags, config).await
}
