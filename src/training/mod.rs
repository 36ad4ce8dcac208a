//! Setup / Training Screen
//!
//! A decorative progress animation, see [`screen`].

pub mod error;
pub mod screen;

pub use error::{TrainingError, TrainingResult};
pub use screen::{
    TrainingConfig, TrainingScreen, TrainingSnapshot, TrainingState, PROGRESS_COMPLETE,
    RESULT_STATS, SAMPLE_IMAGES,
};
