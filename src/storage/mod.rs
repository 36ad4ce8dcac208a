//! Local Storage
//!
//! Browser-style persisted key-value storage:
//!
//! - **kv**: the `KeyValueStore` trait with file and memory backends
//! - **error**: error types
//!
//! # Example
//!
//! ```rust,no_run
//! use stationdesk::storage::{FileStore, KeyValueStore};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FileStore::open("./stationdesk_data")?;
//!     store.set("mock_user", r#"{"user_id":"mock-user-id"}"#)?;
//!     assert!(store.get("mock_user")?.is_some());
//!     store.delete("mock_user")?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod kv;

pub use error::{StorageError, StorageResult};
pub use kv::{FileStore, KeyValueStore, MemoryStore, STORE_FILE};
