//! # roster-console
//!
//! Screens of the Roster admin console, independent of any terminal:
//! - [`EntityScreen`]: list/create/edit/delete state machine per resource
//! - [`LoginScreen`]: credential exchange with a generic failure message
//! - [`Shell`]: route table, the mounted view and full-page redirects
//! - [`Command`]: parser for the interactive console's line commands
//!
//! Rendering to text lives in [`render`] and [`table`].

pub mod command;
pub mod error;
pub mod form;
pub mod login;
pub mod render;
pub mod screen;
pub mod shell;
pub mod table;

pub use command::Command;
pub use error::ConsoleError;
pub use form::Form;
pub use login::LoginScreen;
pub use screen::{AfterMutation, EntityScreen, Listing, Mode, ScreenProfile, Submission};
pub use shell::{Flow, Shell, ShellNavigator, View};
