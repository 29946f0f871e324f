//! Style Adapters
//!
//! Implementations of the StyleTarget port.

mod in_memory_style_target;

pub use in_memory_style_target::InMemoryStyleTarget;
