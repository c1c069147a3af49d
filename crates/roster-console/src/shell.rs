//! Application shell: the route table, the mounted view and redirects.
//!
//! Navigation is full-page. Whenever a screen or client asks the
//! [`ShellNavigator`] for another route, the shell drops the current view and
//! mounts a fresh one for the new route.

use std::sync::{Arc, Mutex, PoisonError};

use roster_auth::Credentials;
use roster_client::ApiClient;
use roster_config::PagingConfig;
use roster_core::{Courses, Departments, Employees, Navigator, Resource, Route, Students};

use crate::command::{Command, HELP};
use crate::error::ConsoleError;
use crate::login::LoginScreen;
use crate::render::{render_login, render_screen};
use crate::screen::{EntityScreen, Mode, Submission};
use crate::table::TableOptions;

/// Records the most recent navigation request until the shell follows it.
#[derive(Debug, Default)]
pub struct ShellNavigator {
    pending: Mutex<Option<Route>>,
}

impl ShellNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending route, if any.
    pub fn take(&self) -> Option<Route> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl Navigator for ShellNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(%route, "navigation requested");
        *self.pending.lock().unwrap_or_else(PoisonError::into_inner) = Some(route);
    }
}

/// The screen currently mounted.
pub enum View {
    Login(LoginScreen),
    Departments(EntityScreen<Departments>),
    Employees(EntityScreen<Employees>),
    Courses(EntityScreen<Courses>),
    Students(EntityScreen<Students>),
}

impl View {
    #[must_use]
    pub const fn route(&self) -> Route {
        match self {
            Self::Login(_) => Route::Login,
            Self::Departments(_) => Route::Departments,
            Self::Employees(_) => Route::Employees,
            Self::Courses(_) => Route::Courses,
            Self::Students(_) => Route::Students,
        }
    }
}

/// Whether the console loop should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    api: ApiClient,
    navigator: Arc<ShellNavigator>,
    paging: PagingConfig,
    table: TableOptions,
    view: View,
}

impl Shell {
    /// `api` must have been built with `navigator` so 403 redirects reach the
    /// shell. Starts on the login view; call [`Shell::open`] to mount a route.
    #[must_use]
    pub fn new(api: ApiClient, navigator: Arc<ShellNavigator>, paging: PagingConfig) -> Self {
        let view = View::Login(LoginScreen::new(&api));
        Self {
            api,
            navigator,
            paging,
            table: TableOptions::default(),
            view,
        }
    }

    #[must_use]
    pub const fn with_table_options(mut self, table: TableOptions) -> Self {
        self.table = table;
        self
    }

    #[must_use]
    pub const fn route(&self) -> Route {
        self.view.route()
    }

    #[must_use]
    pub const fn view(&self) -> &View {
        &self.view
    }

    /// Mount a fresh screen for `route` and follow any redirect it causes.
    ///
    /// # Errors
    ///
    /// Returns the mount failure of the requested screen.
    pub async fn open(&mut self, route: Route) -> Result<(), ConsoleError> {
        let result = self.mount(route).await;
        self.follow_redirects().await;
        result
    }

    /// Run one console command against the mounted view.
    ///
    /// # Errors
    ///
    /// Returns the command's failure after any redirect has been followed.
    pub async fn execute(&mut self, command: Command) -> Result<Flow, ConsoleError> {
        let result = match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => Ok(()),
            Command::Open(route) => self.mount(route).await,
            Command::Login { username, password } => {
                if !matches!(self.view, View::Login(_)) {
                    self.view = View::Login(LoginScreen::new(&self.api));
                }
                match &mut self.view {
                    View::Login(screen) => screen
                        .submit(&Credentials::new(username, password))
                        .await
                        .map_err(ConsoleError::from),
                    _ => Ok(()),
                }
            }
            command => match &mut self.view {
                View::Login(_) => Err(ConsoleError::Unsupported("that command")),
                View::Departments(screen) => apply(screen, command).await,
                View::Employees(screen) => apply(screen, command).await,
                View::Courses(screen) => apply(screen, command).await,
                View::Students(screen) => apply(screen, command).await,
            },
        };
        self.follow_redirects().await;
        result.map(|()| Flow::Continue)
    }

    /// Text rendering of the mounted view.
    #[must_use]
    pub fn render(&self) -> String {
        match &self.view {
            View::Login(screen) => render_login(screen),
            View::Departments(screen) => render_screen(screen, self.table),
            View::Employees(screen) => render_screen(screen, self.table),
            View::Courses(screen) => render_screen(screen, self.table),
            View::Students(screen) => render_screen(screen, self.table),
        }
    }

    #[must_use]
    pub const fn help() -> &'static str {
        HELP
    }

    async fn mount(&mut self, route: Route) -> Result<(), ConsoleError> {
        tracing::debug!(%route, "mounting view");
        match route {
            Route::Login => {
                self.view = View::Login(LoginScreen::new(&self.api));
                Ok(())
            }
            Route::Departments => {
                let (view, result) = self.mount_screen(View::Departments).await;
                self.view = view;
                result
            }
            Route::Employees => {
                let (view, result) = self.mount_screen(View::Employees).await;
                self.view = view;
                result
            }
            Route::Courses => {
                let (view, result) = self.mount_screen(View::Courses).await;
                self.view = view;
                result
            }
            Route::Students => {
                let (view, result) = self.mount_screen(View::Students).await;
                self.view = view;
                result
            }
        }
    }

    async fn mount_screen<R: Resource>(
        &self,
        wrap: fn(EntityScreen<R>) -> View,
    ) -> (View, Result<(), ConsoleError>) {
        let mut screen = EntityScreen::<R>::new(&self.api, self.paging);
        let result = screen.mount().await;
        (wrap(screen), result)
    }

    async fn follow_redirects(&mut self) {
        while let Some(route) = self.navigator.take() {
            tracing::info!(from = %self.route(), to = %route, "redirecting");
            if let Err(error) = self.mount(route).await {
                tracing::debug!(%error, %route, "redirect target failed to load");
            }
        }
    }
}

async fn apply<R: Resource>(
    screen: &mut EntityScreen<R>,
    command: Command,
) -> Result<(), ConsoleError> {
    match command {
        Command::Add(name) => {
            if matches!(screen.mode(), Mode::Editing(_)) {
                screen.begin_create();
            }
            screen.set_name(name);
            screen.submit_create().await.map(drop_submission)
        }
        Command::Pick(id) => screen.pick(id),
        Command::Edit(id) => screen.begin_edit(id),
        Command::Rename(name) => {
            if !matches!(screen.mode(), Mode::Editing(_)) {
                return Err(ConsoleError::NotEditing);
            }
            screen.set_name(name);
            Ok(())
        }
        Command::Save => screen.submit_edit().await.map(drop_submission),
        Command::Cancel => {
            screen.cancel_edit();
            Ok(())
        }
        Command::Delete(id) => screen.delete(id).await,
        Command::Next => screen.next_page().await.map(|_| ()),
        Command::Prev => screen.prev_page().await.map(|_| ()),
        Command::Search(term) => screen.set_search(term),
        Command::Refresh => screen.fetch().await,
        Command::Open(_) | Command::Login { .. } | Command::Help | Command::Quit => Ok(()),
    }
}

/// A rejected submission is shown through the form's field message.
fn drop_submission(submission: Submission) {
    if let Submission::Rejected(error) = submission {
        tracing::debug!(field = ?error.field, "submission rejected");
    }
}
