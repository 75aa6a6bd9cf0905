pub mod accounts;
pub mod error;
pub mod messages;
pub mod routes;
pub mod service;
pub mod state;
pub mod validation;

pub use error::{Rejection, ServiceError, ServiceResult};
pub use service::{AccountService, MessageService};
pub use state::{AppState, AppStateInner};
