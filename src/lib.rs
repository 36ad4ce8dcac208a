//! # Station Desk
//!
//! Station check-in/check-out tracker with mock authentication and a
//! simulated model-training screen.
//!
//! ## Modules
//!
//! - [`storage`]: Local key-value storage the session is persisted in
//! - [`session`]: Session store and sign-up validation
//! - [`visit`]: Visit check-in/check-out flow and its data sink
//! - [`training`]: Simulated training progress screen
//! - [`app`]: Page router dispatching user actions
//! - [`shell`]: Terminal front-end
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stationdesk::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let storage = Arc::new(FileStore::open("./stationdesk_data")?);
//!     let session = Arc::new(SessionStore::open(storage, SessionConfig::default())?);
//!
//!     let mut app = App::new(session, Arc::new(NullSink), TrainingConfig::default()).await;
//!
//!     app.dispatch(Action::Login {
//!         identifier: "ankit".into(),
//!         secret: "12345678".into(),
//!     })
//!     .await?;
//!     app.dispatch(Action::OpenVisit).await?;
//!     app.dispatch(Action::Visit(VisitAction::ChooseLocation(Location::Saket))).await?;
//!     app.dispatch(Action::Visit(VisitAction::ChooseType(VisitType::Station))).await?;
//!     app.dispatch(Action::Visit(VisitAction::CheckIn)).await?;
//!
//!     assert_eq!(app.visit().location(), Some(Location::Saket));
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod config;
pub mod session;
pub mod shell;
pub mod storage;
pub mod training;
pub mod visit;

// Re-export top-level types for convenience
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};

pub use session::{
    AuthError, AuthResult, Field, FieldError, Session, SessionConfig, SessionStore, SignUpForm,
    ValidationErrors,
};

pub use visit::{
    CheckInOutcome, CheckOutDetails, DataSink, Location, Modal, NullSink, SinkError, VisitError,
    VisitFlow, VisitRecord, VisitState, VisitType,
};

pub use training::{TrainingConfig, TrainingError, TrainingScreen, TrainingSnapshot, TrainingState};

pub use app::{Action, App, AppError, AppResult, Page, SetupAction, VisitAction};

pub use shell::{Reply, Shell};

pub use config::{
    AuthConfig, BackendConfig, Config, ConfigError, LoggingConfig,
    StorageConfig as ConfigStorageConfig, TrainingConfig as ConfigTrainingConfig,
};
