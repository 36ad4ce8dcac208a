//! App error types

use crate::app::page::Page;
use thiserror::Error;

/// Errors surfaced by [`App::dispatch`](crate::app::App::dispatch)
#[derive(Error, Debug)]
pub enum AppError {
    /// The action has no meaning on the current page
    #[error("Cannot {action} from the {page} page")]
    Unavailable { action: &'static str, page: Page },

    #[error("{0}")]
    Visit(#[from] crate::visit::VisitError),

    #[error("{0}")]
    Training(#[from] crate::training::TrainingError),

    /// Session persistence failed
    #[error("Session error: {0}")]
    Session(#[from] crate::session::AuthError),
}

/// Result type for app actions
pub type AppResult<T> = Result<T, AppError>;
