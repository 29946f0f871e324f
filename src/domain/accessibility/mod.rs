//! Accessibility module - profiles, themes, styling and reconciliation.
//!
//! # Components
//!
//! - `AccessibilityProfile` - the closed set of presentation presets
//! - `ThemePreference` / `Language` - device-only preferences
//! - `style` - fixed mapping from a profile to root classes and CSS variables
//! - `reconciliation` - decision rule and lifecycle for sign-in sync

mod profile;
pub mod reconciliation;
pub mod style;
mod theme;

pub use profile::AccessibilityProfile;
pub use reconciliation::{reconcile, Conflict, ProfileSource, ReconcilerState, Reconciliation};
pub use style::{style_for, ProfileStyle, StyleVariable};
pub use theme::{Language, ThemePreference};
