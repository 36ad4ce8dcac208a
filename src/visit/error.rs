//! Visit flow error types

use thiserror::Error;

/// Errors from the visit flow controller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VisitError {
    /// The action is not available in the current state
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    /// Check-out confirmed with an empty station field
    #[error("Current station and next station are both required")]
    IncompleteCheckOut,

    /// Check-in attempted without a signed-in user
    #[error("Not signed in")]
    NotSignedIn,
}

/// Errors from the data sink
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("Insert into {table} rejected: {reason}")]
    Rejected { table: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SinkError {
    fn from(err: serde_json::Error) -> Self {
        SinkError::Serialization(err.to_string())
    }
}

/// Result type alias for visit flow operations
pub type VisitResult<T> = Result<T, VisitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VisitError::InvalidTransition {
            action: "check in",
            state: "idle",
        };
        assert_eq!(err.to_string(), "Cannot check in while idle");

        let err = SinkError::Rejected {
            table: "visits".to_string(),
            reason: "offline".to_string(),
        };
        assert_eq!(err.to_string(), "Insert into visits rejected: offline");
    }
}
