use clap::{Args, Subcommand};
use roster_core::EntityId;

/// CRUD commands shared by the four resources.
#[derive(Clone, Debug, Subcommand)]
pub enum ResourceCommands {
    /// List one page.
    List(ListArgs),
    /// Create a record.
    Create(CreateArgs),
    /// Replace a record's name (and reference).
    Update(UpdateArgs),
    /// Delete a record.
    Delete(DeleteArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    /// Zero-based page index.
    #[arg(long, default_value_t = 0)]
    pub page: u32,
    /// Rows per page (defaults to `paging.page_size`).
    #[arg(long)]
    pub size: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct CreateArgs {
    pub name: String,
    /// Department (employees) or course (students) id.
    #[arg(long = "reference", visible_aliases = ["department", "course"])]
    pub reference: Option<EntityId>,
}

#[derive(Clone, Debug, Args)]
pub struct UpdateArgs {
    pub id: EntityId,
    pub name: String,
    /// Department (employees) or course (students) id.
    #[arg(long = "reference", visible_aliases = ["department", "course"])]
    pub reference: Option<EntityId>,
}

#[derive(Clone, Debug, Args)]
pub struct DeleteArgs {
    pub id: EntityId,
}
