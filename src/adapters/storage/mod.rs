//! Storage Adapters
//!
//! Implementations of the PreferenceStore port for device preferences.
//!
//! ## Available Adapters
//!
//! - **FilePreferenceStore** - Stores preferences in a JSON file on disk
//! - **InMemoryPreferenceStore** - Stores preferences in memory (testing/ephemeral sessions)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FilePreferenceStore, InMemoryPreferenceStore};
//!
//! // Persistent: survives restarts
//! let store = FilePreferenceStore::new("./data/preferences.json");
//!
//! // Testing: in-memory storage
//! let store = InMemoryPreferenceStore::new();
//! ```

mod file_preference_store;
mod in_memory_preference_store;

pub use file_preference_store::FilePreferenceStore;
pub use in_memory_preference_store::InMemoryPreferenceStore;
