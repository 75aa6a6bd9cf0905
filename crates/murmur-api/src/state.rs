use std::sync::Arc;

use axum::http::StatusCode;
use murmur_db::Database;
use tracing::error;

use crate::error::ServiceResult;
use crate::service::{AccountService, MessageService};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub accounts: Arc<AccountService<Database>>,
    pub messages: MessageService<Database, Database>,
}

impl AppStateInner {
    pub fn new(db: Arc<Database>) -> Self {
        let accounts = Arc::new(AccountService::new(db.clone()));
        let messages = MessageService::new(db, accounts.clone());
        Self { accounts, messages }
    }
}

/// Run a service call on the blocking pool; the store is synchronous.
pub(crate) async fn run_blocking<F, T>(state: &AppState, f: F) -> Result<ServiceResult<T>, StatusCode>
where
    F: FnOnce(&AppStateInner) -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}
