use clap::{Args, Subcommand};
use roster_core::Route;

use crate::cli::subcommands::{AuthCommands, ResourceCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in and inspect the stored session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Departments.
    Department {
        #[command(subcommand)]
        action: ResourceCommands,
    },
    /// Employees (each belongs to a department).
    Employee {
        #[command(subcommand)]
        action: ResourceCommands,
    },
    /// Courses.
    Course {
        #[command(subcommand)]
        action: ResourceCommands,
    },
    /// Students (each enrolled in a course).
    Student {
        #[command(subcommand)]
        action: ResourceCommands,
    },
    /// Interactive console with screens for every resource.
    Console(ConsoleArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ConsoleArgs {
    /// Screen to open first.
    #[arg(long, default_value_t = Route::DEFAULT)]
    pub open: Route,
}
