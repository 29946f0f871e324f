//! Renders profiles and themes onto a [`StyleTarget`].

use std::sync::Arc;

use crate::domain::accessibility::style::{all_profile_classes, theme_class, DARK_THEME_CLASS};
use crate::domain::accessibility::{style_for, AccessibilityProfile, StyleVariable, ThemePreference};
use crate::ports::StyleTarget;

/// Applies the fixed profile-to-style mapping to the document root.
#[derive(Clone)]
pub struct StyleApplicator {
    target: Arc<dyn StyleTarget>,
}

impl StyleApplicator {
    pub fn new(target: Arc<dyn StyleTarget>) -> Self {
        Self { target }
    }

    /// Clears everything any profile sets, then sets only `profile`'s style.
    ///
    /// The theme class is left alone.
    pub fn apply_profile(&self, profile: AccessibilityProfile) {
        for class in all_profile_classes() {
            self.target.remove_class(class);
        }
        for variable in StyleVariable::ALL {
            self.target.remove_property(variable.css_name());
        }

        let style = style_for(profile);
        if let Some(class) = style.class {
            self.target.add_class(class);
        }
        for (variable, value) in style.variables {
            self.target.set_property(variable.css_name(), value);
        }
    }

    pub fn apply_theme(&self, theme: ThemePreference) {
        match theme_class(theme) {
            Some(class) => self.target.add_class(class),
            None => self.target.remove_class(DARK_THEME_CLASS),
        }
    }
}
