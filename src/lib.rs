//! EcoSense - client core for the energy dashboard.
//!
//! Keeps the user's accessibility profile in step between the device and the
//! account, and provides the account, energy and usability-metrics services
//! the dashboard is built on.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
