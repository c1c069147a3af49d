use roster_auth::AuthError;
use roster_client::ClientError;
use roster_core::{CoreError, EntityId};

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("no record with id {0} on this screen")]
    NotFound(EntityId),

    #[error("{0} is not one of the offered choices")]
    UnknownChoice(EntityId),

    #[error("this screen has no reference to pick")]
    NoReference,

    #[error("nothing is being edited")]
    NotEditing,

    #[error("{0} is not available on this screen")]
    Unsupported(&'static str),

    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

impl ConsoleError {
    /// True when the failure came from a 403 and the shell has been sent to
    /// the login screen.
    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        matches!(self, Self::Client(ClientError::Forbidden))
    }
}
