//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, errors, state machines)
//! - `accessibility` - Profiles, themes, style mapping and profile reconciliation
//! - `account` - The user's account record
//! - `energy` - Consumption records, devices and dashboard aggregates
//! - `usability` - Interaction metrics and the admin overview

pub mod accessibility;
pub mod account;
pub mod energy;
pub mod foundation;
pub mod usability;
