pub mod auth;
pub mod comments;
pub mod error;
pub mod middleware;
pub mod posts;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::{AppState, AppStateInner};
