//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod defaults;
mod pubsub;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use defaults::{PostDefaults, SystemDefaults};
pub use pubsub::{PubSub, PubSubError, PubSubMessage, Subscription};
pub use repository::{BaseRepository, Page, PostRepository, UserRepository};
