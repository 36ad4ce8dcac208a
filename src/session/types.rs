//! Session data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User id of the built-in demo account
pub const DEMO_USER_ID: &str = "mock-user-id";

/// The signed-in identity
///
/// Serialized as JSON into local storage so it survives restarts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Stable identifier sent along with visit records
    pub user_id: String,
    /// Sign-in identifier, if known
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub mobile_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
            full_name: None,
            mobile_number: None,
            created_at: Utc::now(),
        }
    }

    /// The fixed identity handed out for the demo credentials
    pub fn demo() -> Self {
        Self::new(DEMO_USER_ID)
    }

    /// Builder method: set email
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Builder method: set full name
    pub fn full_name(mut self, name: impl Into<String>) -> Self {
        self.full_name = Some(name.into());
        self
    }

    /// Builder method: set mobile number
    pub fn mobile_number(mut self, number: impl Into<String>) -> Self {
        self.mobile_number = Some(number.into());
        self
    }

    /// Name to greet the user with
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.user_id)
    }
}
