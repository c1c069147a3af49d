//! Parser for the interactive console's line commands.

use std::str::FromStr;

use roster_core::{EntityId, Route};

use crate::error::ConsoleError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(Route),
    Login { username: String, password: String },
    /// Set the name on the add form and submit it.
    Add(String),
    /// Select a reference (department or course) on the active form.
    Pick(EntityId),
    Edit(EntityId),
    /// Change the name on the edit form without submitting.
    Rename(String),
    Save,
    Cancel,
    Delete(EntityId),
    Next,
    Prev,
    Search(String),
    Refresh,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  open <departments|employees|courses|students|login>
  login <username> <password>
  add <name>            submit the add form with this name
  pick <id>             select a department/course on the active form
  edit <id>             start editing a record
  rename <name>         change the name on the edit form
  save                  submit the edit form
  cancel                discard the active form
  delete <id>
  next | prev           change page
  search [term]         filter by name (empty term clears)
  refresh               re-list the current page
  help | quit";

impl FromStr for Command {
    type Err = ConsoleError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        let command = match word.to_ascii_lowercase().as_str() {
            "open" | "go" => Self::Open(rest.parse()?),
            "login" => {
                let mut parts = rest.split_whitespace();
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(username), Some(password), None) => Self::Login {
                        username: username.to_string(),
                        password: password.to_string(),
                    },
                    _ => return Err(invalid("usage: login <username> <password>")),
                }
            }
            "add" => Self::Add(rest.to_string()),
            "pick" => Self::Pick(id_arg(rest)?),
            "edit" => Self::Edit(id_arg(rest)?),
            "rename" => Self::Rename(rest.to_string()),
            "save" => Self::Save,
            "cancel" => Self::Cancel,
            "delete" | "rm" => Self::Delete(id_arg(rest)?),
            "next" | "n" => Self::Next,
            "prev" | "p" => Self::Prev,
            "search" | "/" => Self::Search(rest.to_string()),
            "refresh" | "r" => Self::Refresh,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            "" => return Err(invalid("empty command")),
            other => return Err(invalid(&format!("unknown command `{other}`"))),
        };
        Ok(command)
    }
}

fn id_arg(rest: &str) -> Result<EntityId, ConsoleError> {
    rest.parse()
        .map_err(|_| invalid(&format!("expected a numeric id, got `{rest}`")))
}

fn invalid(message: &str) -> ConsoleError {
    ConsoleError::InvalidCommand(message.to_string())
}
