//! Visit Flow Controller
//!
//! The check-in/check-out modal sequence as one state machine:
//!
//! ```text
//! Idle ──choose_location──▶ LocationChosen ──choose_type──▶ TypeChosen
//!                                                            │       │
//!                                                   check_in │       │ check_out
//!                                                            ▼       ▼
//!                                                      CheckedIn   CheckingOut
//!                                                                    │ confirm_check_out
//!                                                                    ▼
//!                                                                   Idle
//! close(): any state ──▶ Idle
//! ```
//!
//! Each state carries exactly the fields valid in it, so at most one modal
//! is ever visible and closing drops every transient field with the state.

use crate::session::Session;
use crate::visit::error::{VisitError, VisitResult};
use crate::visit::location::{Location, VisitType};
use crate::visit::sink::{DataSink, VISITS_TABLE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Location and type picked for the current flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitSelection {
    pub location: Location,
    pub visit_type: VisitType,
}

/// Free-text stations entered on the check-out form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutDetails {
    pub current_station: String,
    pub next_station: String,
}

impl CheckOutDetails {
    /// Both stations filled in
    pub fn is_complete(&self) -> bool {
        !self.current_station.trim().is_empty() && !self.next_station.trim().is_empty()
    }
}

/// Row sent to the data sink on check-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub user_id: String,
    pub location: Location,
    pub visit_type: VisitType,
    pub check_in_time: DateTime<Utc>,
}

/// Flow state
#[derive(Debug, Clone, Default, PartialEq)]
pub enum VisitState {
    #[default]
    Idle,
    LocationChosen {
        location: Location,
    },
    TypeChosen {
        selection: VisitSelection,
    },
    CheckedIn {
        selection: VisitSelection,
        record: VisitRecord,
    },
    CheckingOut {
        selection: VisitSelection,
        details: CheckOutDetails,
    },
}

impl VisitState {
    pub fn name(&self) -> &'static str {
        match self {
            VisitState::Idle => "idle",
            VisitState::LocationChosen { .. } => "choosing a visit type",
            VisitState::TypeChosen { .. } => "choosing check in or check out",
            VisitState::CheckedIn { .. } => "checked in",
            VisitState::CheckingOut { .. } => "filling in check-out details",
        }
    }

    /// The single modal shown for this state
    pub fn modal(&self) -> Option<Modal> {
        match self {
            VisitState::Idle => None,
            VisitState::LocationChosen { .. } => Some(Modal::VisitType),
            VisitState::TypeChosen { .. } => Some(Modal::CheckInOut),
            VisitState::CheckedIn { .. } => Some(Modal::CheckInConfirmation),
            VisitState::CheckingOut { .. } => Some(Modal::CheckOutForm),
        }
    }
}

/// Dialogs of the visit screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    VisitType,
    CheckInOut,
    CheckInConfirmation,
    CheckOutForm,
}

impl Modal {
    pub fn title(&self) -> &'static str {
        match self {
            Modal::VisitType => "Select Visit Type",
            Modal::CheckInOut => "Check In / Check Out",
            Modal::CheckInConfirmation => "Check In Successful",
            Modal::CheckOutForm => "Check Out Details",
        }
    }
}

/// Result of a check-in attempt that reached the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInOutcome {
    /// Sink acknowledged; confirmation is showing
    Confirmed,
    /// Sink failed; the failure was logged and the flow did not move
    NotRecorded,
}

/// The visit screen's flow controller
#[derive(Debug, Default)]
pub struct VisitFlow {
    state: VisitState,
}

impl VisitFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &VisitState {
        &self.state
    }

    pub fn modal(&self) -> Option<Modal> {
        self.state.modal()
    }

    pub fn is_idle(&self) -> bool {
        self.state == VisitState::Idle
    }

    /// Location picked in the current flow, if any
    pub fn location(&self) -> Option<Location> {
        match &self.state {
            VisitState::Idle => None,
            VisitState::LocationChosen { location } => Some(*location),
            VisitState::TypeChosen { selection }
            | VisitState::CheckedIn { selection, .. }
            | VisitState::CheckingOut { selection, .. } => Some(selection.location),
        }
    }

    /// Visit type picked in the current flow, if any
    pub fn visit_type(&self) -> Option<VisitType> {
        match &self.state {
            VisitState::Idle | VisitState::LocationChosen { .. } => None,
            VisitState::TypeChosen { selection }
            | VisitState::CheckedIn { selection, .. }
            | VisitState::CheckingOut { selection, .. } => Some(selection.visit_type),
        }
    }

    /// Check-out form contents, while the form is open
    pub fn check_out_details(&self) -> Option<&CheckOutDetails> {
        match &self.state {
            VisitState::CheckingOut { details, .. } => Some(details),
            _ => None,
        }
    }

    fn invalid(&self, action: &'static str) -> VisitError {
        VisitError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }

    /// `Idle → LocationChosen`
    pub fn choose_location(&mut self, location: Location) -> VisitResult<()> {
        match self.state {
            VisitState::Idle => {
                tracing::debug!(%location, "Location chosen");
                self.state = VisitState::LocationChosen { location };
                Ok(())
            }
            _ => Err(self.invalid("choose a location")),
        }
    }

    /// `LocationChosen → TypeChosen`
    pub fn choose_type(&mut self, visit_type: VisitType) -> VisitResult<()> {
        match self.state {
            VisitState::LocationChosen { location } => {
                tracing::debug!(%location, %visit_type, "Visit type chosen");
                self.state = VisitState::TypeChosen {
                    selection: VisitSelection {
                        location,
                        visit_type,
                    },
                };
                Ok(())
            }
            _ => Err(self.invalid("choose a visit type")),
        }
    }

    /// `TypeChosen → CheckedIn`, recording the visit in `sink`
    ///
    /// Sink failures are logged and leave the check-in/check-out modal open.
    pub async fn check_in(
        &mut self,
        session: Option<&Session>,
        sink: &dyn DataSink,
    ) -> VisitResult<CheckInOutcome> {
        let selection = match self.state {
            VisitState::TypeChosen { selection } => selection,
            _ => return Err(self.invalid("check in")),
        };
        let session = session.ok_or(VisitError::NotSignedIn)?;

        let record = VisitRecord {
            user_id: session.user_id.clone(),
            location: selection.location,
            visit_type: selection.visit_type,
            check_in_time: Utc::now(),
        };

        let insert = match serde_json::to_value(&record) {
            Ok(row) => sink.insert(VISITS_TABLE, row).await,
            Err(e) => Err(e.into()),
        };

        match insert {
            Ok(()) => {
                tracing::info!(
                    user_id = %record.user_id,
                    location = %record.location,
                    visit_type = %record.visit_type,
                    "Checked in"
                );
                self.state = VisitState::CheckedIn { selection, record };
                Ok(CheckInOutcome::Confirmed)
            }
            Err(e) => {
                tracing::error!("Error checking in: {}", e);
                Ok(CheckInOutcome::NotRecorded)
            }
        }
    }

    /// `TypeChosen → CheckingOut` with an empty form
    pub fn check_out(&mut self) -> VisitResult<()> {
        match self.state {
            VisitState::TypeChosen { selection } => {
                self.state = VisitState::CheckingOut {
                    selection,
                    details: CheckOutDetails::default(),
                };
                Ok(())
            }
            _ => Err(self.invalid("check out")),
        }
    }

    pub fn set_current_station(&mut self, text: impl Into<String>) -> VisitResult<()> {
        match &mut self.state {
            VisitState::CheckingOut { details, .. } => {
                details.current_station = text.into();
                Ok(())
            }
            _ => Err(self.invalid("edit the current station")),
        }
    }

    pub fn set_next_station(&mut self, text: impl Into<String>) -> VisitResult<()> {
        match &mut self.state {
            VisitState::CheckingOut { details, .. } => {
                details.next_station = text.into();
                Ok(())
            }
            _ => Err(self.invalid("edit the next station")),
        }
    }

    /// Whether the check-out confirm action is enabled
    pub fn can_confirm_check_out(&self) -> bool {
        self.check_out_details()
            .map(CheckOutDetails::is_complete)
            .unwrap_or(false)
    }

    /// `CheckingOut → Idle`, once both stations are filled in
    pub fn confirm_check_out(&mut self) -> VisitResult<CheckOutDetails> {
        match &self.state {
            VisitState::CheckingOut { selection, details } => {
                if !details.is_complete() {
                    return Err(VisitError::IncompleteCheckOut);
                }
                tracing::info!(
                    location = %selection.location,
                    current_station = %details.current_station,
                    next_station = %details.next_station,
                    "Checked out"
                );
                let details = details.clone();
                self.state = VisitState::Idle;
                Ok(details)
            }
            _ => Err(self.invalid("confirm check out")),
        }
    }

    /// Dismiss whatever is open and forget the flow
    pub fn close(&mut self) {
        if !self.is_idle() {
            tracing::debug!(state = self.state.name(), "Visit flow closed");
        }
        self.state = VisitState::Idle;
    }
}
