//! View Router
//!
//! - **page**: `Page`, `Action` and the per-screen action enums
//! - **state**: `App`, which owns the current page and dispatches actions
//! - **error**: error types
//!
//! ```text
//!            ┌──────── signed out ────────┐      ┌─────────── signed in ───────────┐
//!            Login ◀──────────▶ SignUp            Dashboard ──▶ Visit ──▶ Dashboard
//!              │ login             │ register         │      ──▶ Setup ──▶ Dashboard
//!              └───────────────────┴───────────────▶  │
//!                                      logout ◀───────┘ (from any signed-in page)
//! ```

pub mod error;
pub mod page;
pub mod state;

pub use error::{AppError, AppResult};
pub use page::{Action, Page, SetupAction, VisitAction};
pub use state::{App, LOGIN_FAILED_MESSAGE, SIGN_UP_FAILED_MESSAGE};
