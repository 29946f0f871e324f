//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory repositories and remote profile service (tests, offline use)
//! - `rest` - PostgREST client for the hosted backend
//! - `storage` - Device preference stores (file, in-memory)
//! - `style` - Style targets the applied profile is rendered on

pub mod memory;
pub mod rest;
pub mod storage;
pub mod style;
