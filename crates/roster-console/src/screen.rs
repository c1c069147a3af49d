//! Entity screen state machine.
//!
//! One [`EntityScreen`] lists, creates, edits and deletes the records of a
//! single resource. It owns its record list exclusively; the only shared value
//! it reads is the session token, through the [`ApiClient`].
//!
//! # States
//!
//! `Loading` while a list call is in flight, `Listing` otherwise, `Creating`
//! while the add form is active and `Editing(record)` while a record is being
//! changed. Every completed mutation returns to `Listing`.
//!
//! How a screen lists and how it reflects mutations is fixed per resource by
//! its [`ScreenProfile`].

use roster_client::{ApiClient, ClientError, ResourceClient};
use roster_config::PagingConfig;
use roster_core::validate::FieldError;
use roster_core::{Choice, EntityId, Record, Resource, ResourceKind};

use crate::error::ConsoleError;
use crate::form::Form;

/// How a screen fetches its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    /// One server page at a time, `paging.page_size` rows, with next/prev.
    Paged,
    /// A single large page (`paging.bulk_size`), filtered locally.
    Bulk,
}

/// How a screen reflects a completed create/update/delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterMutation {
    /// Re-fetch the current page.
    Refetch,
    /// Patch the held list in place.
    Patch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenProfile {
    pub listing: Listing,
    pub after_mutation: AfterMutation,
    /// Whether a name search filters the held records.
    pub searchable: bool,
}

impl ScreenProfile {
    #[must_use]
    pub const fn for_kind(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Departments => Self {
                listing: Listing::Paged,
                after_mutation: AfterMutation::Refetch,
                searchable: false,
            },
            ResourceKind::Courses => Self {
                listing: Listing::Paged,
                after_mutation: AfterMutation::Refetch,
                searchable: true,
            },
            ResourceKind::Employees => Self {
                listing: Listing::Bulk,
                after_mutation: AfterMutation::Patch,
                searchable: true,
            },
            ResourceKind::Students => Self {
                listing: Listing::Paged,
                after_mutation: AfterMutation::Patch,
                searchable: false,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode<E> {
    Loading,
    Listing,
    Creating,
    Editing(E),
}

/// Result of a create or update submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The request was sent and succeeded.
    Sent,
    /// Client-side validation failed; no request was sent.
    Rejected(FieldError),
}

pub struct EntityScreen<R: Resource> {
    api: ApiClient,
    client: ResourceClient<R>,
    profile: ScreenProfile,
    paging: PagingConfig,
    mode: Mode<R::Entity>,
    records: Vec<R::Entity>,
    page: u32,
    total_pages: u32,
    search: String,
    form: Form,
    choices: Vec<Choice>,
    last_error: Option<String>,
}

impl<R: Resource> EntityScreen<R> {
    #[must_use]
    pub fn new(api: &ApiClient, paging: PagingConfig) -> Self {
        Self {
            api: api.clone(),
            client: api.resource::<R>(),
            profile: ScreenProfile::for_kind(R::KIND),
            paging,
            mode: Mode::Loading,
            records: Vec::new(),
            page: 0,
            total_pages: 1,
            search: String::new(),
            form: Form::default(),
            choices: Vec::new(),
            last_error: None,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        R::KIND
    }

    #[must_use]
    pub const fn profile(&self) -> ScreenProfile {
        self.profile
    }

    #[must_use]
    pub const fn mode(&self) -> &Mode<R::Entity> {
        &self.mode
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.mode, Mode::Loading)
    }

    /// All records held by the screen, in server order.
    #[must_use]
    pub fn records(&self) -> &[R::Entity] {
        &self.records
    }

    /// Records after the search filter, when the screen supports one.
    #[must_use]
    pub fn visible(&self) -> Vec<&R::Entity> {
        let needle = self.search.to_lowercase();
        self.records
            .iter()
            .filter(|record| {
                !self.profile.searchable
                    || needle.is_empty()
                    || record.name().to_lowercase().contains(&needle)
            })
            .collect()
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub const fn form(&self) -> &Form {
        &self.form
    }

    /// Reference candidates for the picker. Empty for name-only resources.
    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Message of the last failed request, cleared by the next success.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// First load: list the current page and, for resources with a reference,
    /// the picker candidates alongside it.
    ///
    /// # Errors
    ///
    /// Returns the list failure. A picker failure is logged and leaves the
    /// picker empty.
    pub async fn mount(&mut self) -> Result<(), ConsoleError> {
        let Some(target) = R::KIND.reference() else {
            return self.fetch().await;
        };
        let api = self.api.clone();
        let lookup_size = self.paging.lookup_size;
        let lookup = async move { api.choices(target, lookup_size).await };

        let (listed, choices) = tokio::join!(self.fetch(), lookup);
        match choices {
            Ok(choices) => self.choices = choices,
            Err(error) => {
                tracing::error!(resource = %R::KIND, %error, "failed to load {target} choices");
                self.choices.clear();
            }
        }
        listed
    }

    /// List the current page (or the bulk set) from the server.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Client`] if the list call fails; the screen
    /// leaves `Loading` either way.
    pub async fn fetch(&mut self) -> Result<(), ConsoleError> {
        let (page, size) = match self.profile.listing {
            Listing::Paged => (self.page, self.paging.page_size),
            Listing::Bulk => (0, self.paging.bulk_size),
        };
        self.mode = Mode::Loading;
        let result = self.client.list(page, size).await;
        self.mode = Mode::Listing;

        match result {
            Ok(listed) => {
                self.total_pages = listed.page_count();
                self.records = listed.content;
                self.last_error = None;
                Ok(())
            }
            Err(error) => Err(self.failed("list", error)),
        }
    }

    /// Move to the next page. Returns `false` when already on the last page.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::Unsupported`] on bulk screens, otherwise the list
    /// failure.
    pub async fn next_page(&mut self) -> Result<bool, ConsoleError> {
        let target = self.page.saturating_add(1).min(self.total_pages.saturating_sub(1));
        self.go_to(target).await
    }

    /// Move to the previous page. Returns `false` when already on page 0.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::Unsupported`] on bulk screens, otherwise the list
    /// failure.
    pub async fn prev_page(&mut self) -> Result<bool, ConsoleError> {
        let target = self.page.saturating_sub(1);
        self.go_to(target).await
    }

    async fn go_to(&mut self, target: u32) -> Result<bool, ConsoleError> {
        if self.profile.listing != Listing::Paged {
            return Err(ConsoleError::Unsupported("paging"));
        }
        if target == self.page {
            return Ok(false);
        }
        self.page = target;
        self.fetch().await?;
        Ok(true)
    }

    /// Set the live name filter. No request is made.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::Unsupported`] on screens without search.
    pub fn set_search(&mut self, term: impl Into<String>) -> Result<(), ConsoleError> {
        if !self.profile.searchable {
            return Err(ConsoleError::Unsupported("search"));
        }
        self.search = term.into();
        Ok(())
    }

    /// Open an empty add form.
    pub fn begin_create(&mut self) {
        self.form.clear();
        self.mode = Mode::Creating;
    }

    /// Set the name on the active form, opening the add form from `Listing`.
    pub fn set_name(&mut self, name: impl Into<String>) {
        if matches!(self.mode, Mode::Listing | Mode::Loading) {
            self.begin_create();
        }
        self.form.set_name(name);
    }

    /// Select a reference on the active form, opening the add form from
    /// `Listing`.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::NoReference`] for name-only resources and
    /// [`ConsoleError::UnknownChoice`] when `id` was not offered.
    pub fn pick(&mut self, id: EntityId) -> Result<(), ConsoleError> {
        if R::KIND.reference().is_none() {
            return Err(ConsoleError::NoReference);
        }
        if !self.choices.iter().any(|choice| choice.id == id) {
            return Err(ConsoleError::UnknownChoice(id));
        }
        if matches!(self.mode, Mode::Listing | Mode::Loading) {
            self.begin_create();
        }
        self.form.set_reference(id);
        Ok(())
    }

    /// Validate the add form and create the record.
    ///
    /// # Errors
    ///
    /// Returns the create (or follow-up list) failure. Validation failures
    /// are reported as [`Submission::Rejected`], not as errors.
    pub async fn submit_create(&mut self) -> Result<Submission, ConsoleError> {
        if let Err(rejected) = self.form.validate(R::KIND) {
            return Ok(Submission::Rejected(rejected));
        }
        let draft = R::draft(self.form.name.clone(), self.form.reference);
        let created = match self.client.create(&draft).await {
            Ok(created) => created,
            Err(error) => return Err(self.failed("create", error)),
        };
        tracing::info!(resource = %R::KIND, id = %created.id(), "created");

        match self.profile.after_mutation {
            AfterMutation::Refetch => self.fetch().await?,
            AfterMutation::Patch => {
                let created = self.with_picked_reference(created);
                self.records.push(created);
            }
        }
        self.form.clear();
        self.mode = Mode::Listing;
        Ok(Submission::Sent)
    }

    /// Switch to `Editing` with the form pre-filled from record `id`.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::NotFound`] if the screen does not hold `id`.
    pub fn begin_edit(&mut self, id: EntityId) -> Result<(), ConsoleError> {
        let record = self
            .records
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or(ConsoleError::NotFound(id))?;
        self.form = Form::from_record(&record);
        self.mode = Mode::Editing(record);
        Ok(())
    }

    /// Validate the edit form and replace the record being edited.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::NotEditing`] outside `Editing`, otherwise the update
    /// (or follow-up list) failure.
    pub async fn submit_edit(&mut self) -> Result<Submission, ConsoleError> {
        let Mode::Editing(editing) = &self.mode else {
            return Err(ConsoleError::NotEditing);
        };
        let id = editing.id();
        if let Err(rejected) = self.form.validate(R::KIND) {
            return Ok(Submission::Rejected(rejected));
        }
        let draft = R::draft(self.form.name.clone(), self.form.reference);
        let updated = match self.client.update(id, &draft).await {
            Ok(updated) => updated,
            Err(error) => return Err(self.failed("update", error)),
        };
        tracing::info!(resource = %R::KIND, %id, "updated");

        match self.profile.after_mutation {
            AfterMutation::Refetch => self.fetch().await?,
            AfterMutation::Patch => {
                let updated = self.with_picked_reference(updated);
                if let Some(slot) = self.records.iter_mut().find(|record| record.id() == id) {
                    *slot = updated;
                }
            }
        }
        self.form.clear();
        self.mode = Mode::Listing;
        Ok(Submission::Sent)
    }

    /// Leave `Creating`/`Editing`, discarding input and validation messages.
    pub fn cancel_edit(&mut self) {
        self.form.clear();
        if !self.is_loading() {
            self.mode = Mode::Listing;
        }
    }

    /// Delete record `id` and drop it from the screen.
    ///
    /// # Errors
    ///
    /// Returns the delete (or follow-up list) failure.
    pub async fn delete(&mut self, id: EntityId) -> Result<(), ConsoleError> {
        if let Err(error) = self.client.delete(id).await {
            return Err(self.failed("delete", error));
        }
        tracing::info!(resource = %R::KIND, %id, "deleted");

        match self.profile.after_mutation {
            AfterMutation::Refetch => self.fetch().await?,
            AfterMutation::Patch => self.records.retain(|record| record.id() != id),
        }
        if matches!(&self.mode, Mode::Editing(editing) if editing.id() == id) {
            self.form.clear();
        }
        self.mode = Mode::Listing;
        Ok(())
    }

    /// The server echo may carry only `{id}` for the reference; embed the
    /// picked name so the listing can show it.
    fn with_picked_reference(&self, mut entity: R::Entity) -> R::Entity {
        let picked = self
            .form
            .reference
            .and_then(|id| self.choices.iter().find(|choice| choice.id == id));
        if let Some(choice) = picked {
            R::attach(&mut entity, choice);
        }
        entity
    }

    fn failed(&mut self, operation: &'static str, error: ClientError) -> ConsoleError {
        tracing::error!(resource = %R::KIND, operation, %error, "request failed");
        self.last_error = Some(error.to_string());
        ConsoleError::Client(error)
    }
}
