//! Data Sink
//!
//! Where check-in events would be persisted. The active implementation,
//! `NullSink`, acknowledges every insert and discards the record; there is
//! no read path.

use crate::visit::error::SinkError;
use async_trait::async_trait;

/// Table check-in records are inserted into
pub const VISITS_TABLE: &str = "visits";

/// Record-insert surface of a backing store
#[async_trait]
pub trait DataSink: Send + Sync {
    /// Insert one record into `table`
    async fn insert(&self, table: &str, record: serde_json::Value) -> Result<(), SinkError>;
}

/// Sink that always succeeds and keeps nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

#[async_trait]
impl DataSink for NullSink {
    async fn insert(&self, table: &str, record: serde_json::Value) -> Result<(), SinkError> {
        tracing::debug!(table, %record, "Discarding insert");
        Ok(())
    }
}
