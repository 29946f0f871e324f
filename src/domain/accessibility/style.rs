//! Presentation variables for each accessibility profile.
//!
//! Each profile owns a fixed set of CSS custom properties and one root class.
//! No two profiles share a variable, so clearing the union of all sets and then
//! setting one profile's set never leaves another profile's values behind.

use super::{AccessibilityProfile, ThemePreference};

/// CSS custom property set on the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleVariable {
    FontSizeBase,
    ContrastBoost,
    AnimationDuration,
    TargetSizeMin,
    SpacingInteractive,
    ContentMaxWidth,
    LineHeight,
}

impl StyleVariable {
    pub const ALL: [StyleVariable; 7] = [
        StyleVariable::FontSizeBase,
        StyleVariable::ContrastBoost,
        StyleVariable::AnimationDuration,
        StyleVariable::TargetSizeMin,
        StyleVariable::SpacingInteractive,
        StyleVariable::ContentMaxWidth,
        StyleVariable::LineHeight,
    ];

    /// Property name including the leading `--`.
    pub fn css_name(&self) -> &'static str {
        match self {
            StyleVariable::FontSizeBase => "--font-size-base",
            StyleVariable::ContrastBoost => "--contrast-boost",
            StyleVariable::AnimationDuration => "--animation-duration",
            StyleVariable::TargetSizeMin => "--target-size-min",
            StyleVariable::SpacingInteractive => "--spacing-interactive",
            StyleVariable::ContentMaxWidth => "--content-max-width",
            StyleVariable::LineHeight => "--line-height",
        }
    }
}

/// Class and variables a profile puts on the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileStyle {
    pub class: Option<&'static str>,
    pub variables: &'static [(StyleVariable, &'static str)],
}

const VISUAL: &[(StyleVariable, &str)] = &[
    (StyleVariable::FontSizeBase, "1.125rem"),
    (StyleVariable::ContrastBoost, "1.2"),
];
const AUDITORY: &[(StyleVariable, &str)] = &[(StyleVariable::AnimationDuration, "0.6s")];
const MOTOR: &[(StyleVariable, &str)] = &[
    (StyleVariable::TargetSizeMin, "48px"),
    (StyleVariable::SpacingInteractive, "1rem"),
];
const COGNITIVE: &[(StyleVariable, &str)] = &[
    (StyleVariable::ContentMaxWidth, "65ch"),
    (StyleVariable::LineHeight, "1.8"),
];

/// Root class toggled by the dark theme.
pub const DARK_THEME_CLASS: &str = "dark";

/// Style owned by `profile`.
pub fn style_for(profile: AccessibilityProfile) -> ProfileStyle {
    match profile {
        AccessibilityProfile::None => ProfileStyle {
            class: None,
            variables: &[],
        },
        AccessibilityProfile::Visual => ProfileStyle {
            class: Some("perfil-visual"),
            variables: VISUAL,
        },
        AccessibilityProfile::Auditory => ProfileStyle {
            class: Some("perfil-auditiva"),
            variables: AUDITORY,
        },
        AccessibilityProfile::Motor => ProfileStyle {
            class: Some("perfil-motriz"),
            variables: MOTOR,
        },
        AccessibilityProfile::Cognitive => ProfileStyle {
            class: Some("perfil-cognitiva"),
            variables: COGNITIVE,
        },
    }
}

/// Every class any profile may set.
pub fn all_profile_classes() -> impl Iterator<Item = &'static str> {
    AccessibilityProfile::ALL
        .into_iter()
        .filter_map(|profile| style_for(profile).class)
}

/// Whether the dark class belongs on the root for `theme`.
pub fn theme_class(theme: ThemePreference) -> Option<&'static str> {
    theme.is_dark().then_some(DARK_THEME_CLASS)
}
