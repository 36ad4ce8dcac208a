//! Station Visits
//!
//! - **location**: the fixed site list and visit types
//! - **flow**: `VisitFlow`, the check-in/check-out state machine
//! - **sink**: `DataSink`, where check-in records go
//! - **error**: error types

pub mod error;
pub mod flow;
pub mod location;
pub mod sink;

pub use error::{SinkError, VisitError, VisitResult};
pub use flow::{
    CheckInOutcome, CheckOutDetails, Modal, VisitFlow, VisitRecord, VisitSelection, VisitState,
};
pub use location::{Location, VisitType};
pub use sink::{DataSink, NullSink, VISITS_TABLE};
