use std::sync::Arc;

use quill_db::{Database, SqlitePostGateway, SqliteUserGateway};
use quill_service::{ContentService, IdentityService, PostGateway, ServiceError, UserGateway};
use tracing::error;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub identity: IdentityService,
    pub content: ContentService,
}

impl AppStateInner {
    pub fn new(users: Arc<dyn UserGateway>, posts: Arc<dyn PostGateway>) -> AppState {
        Arc::new(Self {
            identity: IdentityService::new(users.clone()),
            content: ContentService::new(posts, users),
        })
    }

    /// Wires both services to SQLite gateways sharing one database handle.
    pub fn with_database(db: Arc<Database>) -> AppState {
        Self::new(
            Arc::new(SqliteUserGateway::new(db.clone())),
            Arc::new(SqlitePostGateway::new(db)),
        )
    }
}

/// Runs a blocking service call off the async runtime.
pub(crate) async fn run_blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal
        })?
        .map_err(ApiError::from)
}
