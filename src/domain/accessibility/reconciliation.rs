//! Local vs remote accessibility profile reconciliation.
//!
//! The decision rule is a pure function of the device-stored value and the
//! value on the user's remote record. The lifecycle around it is the
//! [`ReconcilerState`] state machine driven by the profile sync session.

use serde::Serialize;

use super::AccessibilityProfile;
use crate::domain::foundation::StateMachine;

/// Lifecycle of one reconciliation run for one signed-in identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcilerState {
    /// No authenticated identity, or nothing in progress.
    Idle,
    /// Remote profile requested; applied state untouched.
    Fetching,
    /// Fetch completed and no user decision is needed.
    NoConflict,
    /// Local and remote disagree; waiting for the user.
    ConflictPending,
    /// Applied profile agrees with what the user wants persisted.
    Resolved,
}

impl ReconcilerState {
    pub fn is_fetching(&self) -> bool {
        matches!(self, ReconcilerState::Fetching)
    }

    pub fn is_conflict_pending(&self) -> bool {
        matches!(self, ReconcilerState::ConflictPending)
    }
}

impl StateMachine for ReconcilerState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ReconcilerState::*;
        matches!(
            (self, target),
            (Idle, Fetching)
                | (Fetching, NoConflict)
                | (Fetching, ConflictPending)
                | (Fetching, Idle)
                | (NoConflict, Resolved)
                | (ConflictPending, Resolved)
                | (ConflictPending, Idle)
                | (Resolved, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ReconcilerState::*;
        match self {
            Idle => vec![Fetching],
            Fetching => vec![NoConflict, ConflictPending, Idle],
            NoConflict => vec![Resolved],
            ConflictPending => vec![Resolved, Idle],
            Resolved => vec![Idle],
        }
    }
}

/// Both sides of a detected disagreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub local: AccessibilityProfile,
    pub remote: AccessibilityProfile,
}

/// Where an automatically applied profile came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSource {
    Local,
    Remote,
    Default,
}

/// Outcome of comparing the local and remote preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Apply this profile without asking.
    Apply {
        profile: AccessibilityProfile,
        source: ProfileSource,
    },
    /// Both sides already hold this profile.
    Consistent(AccessibilityProfile),
    /// Leave the applied profile alone and ask the user.
    Conflict(Conflict),
}

impl Reconciliation {
    /// State the reconciler moves to after `Fetching`.
    pub fn next_state(&self) -> ReconcilerState {
        match self {
            Reconciliation::Conflict(_) => ReconcilerState::ConflictPending,
            _ => ReconcilerState::NoConflict,
        }
    }

    pub fn conflict(&self) -> Option<Conflict> {
        match self {
            Reconciliation::Conflict(conflict) => Some(*conflict),
            _ => None,
        }
    }

    /// Profile to apply now, if any. A conflict applies nothing.
    pub fn profile_to_apply(&self) -> Option<AccessibilityProfile> {
        match self {
            Reconciliation::Apply { profile, .. } => Some(*profile),
            Reconciliation::Consistent(profile) => Some(*profile),
            Reconciliation::Conflict(_) => None,
        }
    }
}

/// Decides how a sign-in reconciles the device preference with the account.
///
/// `remote` is `None` when the account has no stored profile and also when the
/// fetch failed; both mean there is nothing on the account side to honour.
pub fn reconcile(
    local: Option<AccessibilityProfile>,
    remote: Option<AccessibilityProfile>,
) -> Reconciliation {
    match (local, remote) {
        (None, Some(remote)) => Reconciliation::Apply {
            profile: remote,
            source: ProfileSource::Remote,
        },
        (None, None) => Reconciliation::Apply {
            profile: AccessibilityProfile::None,
            source: ProfileSource::Default,
        },
        (Some(local), None) => Reconciliation::Apply {
            profile: local,
            source: ProfileSource::Local,
        },
        (Some(local), Some(remote)) if local == remote => Reconciliation::Consistent(local),
        (Some(local), Some(remote)) => Reconciliation::Conflict(Conflict { local, remote }),
    }
}
