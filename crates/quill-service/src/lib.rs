//! Business rules for users, posts and comments.
//!
//! Services depend only on the [`gateway`] traits, so every rule can be
//! exercised against a test double without a database.

pub mod content;
pub mod error;
pub mod gateway;
pub mod identity;

pub use content::ContentService;
pub use error::{ErrorKind, ServiceError, ValidationError};
pub use gateway::{GatewayError, Inserted, PostGateway, UserGateway};
pub use identity::IdentityService;
