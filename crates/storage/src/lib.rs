#![forbid(unsafe_code)]

pub mod reading_state;
pub mod repository;
pub mod session_state;
pub mod sqlite;

pub use reading_state::{PersistedReading, ReadingStateStore};
pub use repository::{InMemoryStore, KeyValueStore, Storage, StorageError};
pub use session_state::SessionStore;
