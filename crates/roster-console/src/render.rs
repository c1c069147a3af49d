//! Text rendering of screens for the interactive console.

use std::fmt::Write as _;

use roster_core::{Record, Resource};

use crate::login::LoginScreen;
use crate::screen::{EntityScreen, Listing, Mode};
use crate::table::{TableOptions, render_table};

/// Render an entity screen: heading, table, then the active form if any.
#[must_use]
pub fn render_screen<R: Resource>(screen: &EntityScreen<R>, options: TableOptions) -> String {
    let kind = screen.kind();
    let mut out = String::from(kind.plural());
    if screen.profile().listing == Listing::Paged {
        let _ = write!(out, " (page {}/{})", screen.page() + 1, screen.total_pages());
    }
    if !screen.search().is_empty() {
        let _ = write!(out, " [search: {}]", screen.search());
    }
    out.push('\n');

    if screen.is_loading() {
        out.push_str("loading…");
        return out;
    }

    let reference_header = kind.reference_field();
    let mut headers = vec!["id", "name"];
    headers.extend(reference_header);

    let visible = screen.visible();
    if visible.is_empty() {
        out.push_str("(no rows)");
    } else {
        let rows: Vec<Vec<String>> = visible
            .iter()
            .map(|record| {
                let mut row = vec![record.id().to_string(), record.name().to_string()];
                if reference_header.is_some() {
                    row.push(record.reference().map_or_else(|| "-".to_string(), |c| c.name));
                }
                row
            })
            .collect();
        out.push_str(&render_table(&headers, &rows, options));
    }

    if let Some(error) = screen.last_error() {
        let _ = write!(out, "\nerror: {error}");
    }

    let form = screen.form();
    let title = match screen.mode() {
        Mode::Creating => Some(format!("New {}", kind.singular().to_lowercase())),
        Mode::Editing(record) => Some(format!("Editing {} #{}", kind.singular().to_lowercase(), record.id())),
        Mode::Loading | Mode::Listing => None,
    };
    if let Some(title) = title {
        let _ = write!(out, "\n\n{title}\n  name: {}", form.name);
        if let Some(field) = reference_header {
            let picked = form
                .reference
                .and_then(|id| screen.choices().iter().find(|choice| choice.id == id))
                .map_or_else(|| "(none)".to_string(), |choice| format!("{} #{}", choice.name, choice.id));
            let _ = write!(out, "\n  {field}: {picked}");
            let offered = screen
                .choices()
                .iter()
                .map(|choice| format!("{}={}", choice.id, choice.name))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = write!(out, "\n  choices: {}", if offered.is_empty() { "(none)" } else { &offered });
        }
        if let Some(error) = &form.error {
            let _ = write!(out, "\n  ! {error}");
        }
    }
    out
}

#[must_use]
pub fn render_login(screen: &LoginScreen) -> String {
    let mut out = String::from("Sign in\n  login <username> <password>");
    if let Some(error) = screen.error() {
        let _ = write!(out, "\n  ! {error}");
    }
    out
}
