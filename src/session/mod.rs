//! Session Management
//!
//! - **types**: the persisted `Session` identity
//! - **validation**: sign-up form rules
//! - **store**: `SessionStore`, the sign-in/sign-up/sign-out surface
//! - **error**: error types
//!
//! # Lifecycle
//!
//! ```text
//! startup:  storage.get("mock_user") → restore (or signed out)
//! sign-in:  check demo pair → storage.set → current = Some
//! sign-up:  validate form → fabricate id → storage.set → current = Some
//! sign-out: current = None → storage.delete
//! ```

pub mod error;
pub mod store;
pub mod types;
pub mod validation;

pub use error::{AuthError, AuthResult};
pub use store::{SessionConfig, SessionStore, DEMO_IDENTIFIERS, DEMO_SECRET, SESSION_KEY};
pub use types::{Session, DEMO_USER_ID};
pub use validation::{
    Field, FieldError, SignUpForm, SignUpValidator, ValidationErrors, MIN_PASSWORD_LEN,
    MOBILE_DIGITS,
};
