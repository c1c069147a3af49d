use roster_client::ApiClient;
use roster_config::RosterConfig;
use roster_core::validate::check_submission;
use roster_core::{
    CoreError, Courses, Departments, EntityId, Employees, Resource, ResourceKind, Students,
};
use serde::Serialize;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::ResourceCommands;
use crate::output::output;

#[derive(Serialize)]
struct DeleteResponse {
    deleted: EntityId,
    resource: ResourceKind,
}

/// Handle `roster <department|employee|course|student> <subcommand>`.
pub async fn handle(
    kind: ResourceKind,
    action: &ResourceCommands,
    flags: &GlobalFlags,
    config: &RosterConfig,
) -> anyhow::Result<()> {
    let api = bootstrap::api_client(config)?;
    match kind {
        ResourceKind::Departments => run::<Departments>(&api, action, flags, config).await,
        ResourceKind::Employees => run::<Employees>(&api, action, flags, config).await,
        ResourceKind::Courses => run::<Courses>(&api, action, flags, config).await,
        ResourceKind::Students => run::<Students>(&api, action, flags, config).await,
    }
}

async fn run<R: Resource>(
    api: &ApiClient,
    action: &ResourceCommands,
    flags: &GlobalFlags,
    config: &RosterConfig,
) -> anyhow::Result<()> {
    let client = api.resource::<R>();
    match action {
        ResourceCommands::List(args) => {
            let size = args.size.unwrap_or(config.paging.page_size);
            let page = client.list(args.page, size).await?;
            output(&page, flags.format)
        }
        ResourceCommands::Create(args) => {
            validate::<R>(&args.name, args.reference)?;
            let created = client
                .create(&R::draft(args.name.clone(), args.reference))
                .await?;
            output(&created, flags.format)
        }
        ResourceCommands::Update(args) => {
            validate::<R>(&args.name, args.reference)?;
            let updated = client
                .update(args.id, &R::draft(args.name.clone(), args.reference))
                .await?;
            output(&updated, flags.format)
        }
        ResourceCommands::Delete(args) => {
            client.delete(args.id).await?;
            output(
                &DeleteResponse {
                    deleted: args.id,
                    resource: R::KIND,
                },
                flags.format,
            )
        }
    }
}

/// Run the same checks the console forms run, before any request is built.
fn validate<R: Resource>(name: &str, reference: Option<EntityId>) -> Result<(), CoreError> {
    check_submission(R::KIND, name, reference)?;
    if reference.is_some() && R::KIND.reference().is_none() {
        tracing::warn!(resource = %R::KIND, "--reference is ignored for this resource");
    }
    Ok(())
}
