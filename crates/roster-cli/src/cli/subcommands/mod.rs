pub mod auth;
pub mod resource;

pub use auth::AuthCommands;
pub use resource::ResourceCommands;
