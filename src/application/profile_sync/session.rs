//! ProfileSync - the single owner of applied accessibility, theme and language state.
//!
//! Constructed once per client session with its three collaborators and passed
//! explicitly to whatever needs it. Observers either poll [`ProfileSync::snapshot`]
//! or hold a [`watch::Receiver`] from [`ProfileSync::subscribe`].
//!
//! # Sign-in reconciliation
//!
//! ```text
//! Idle ──sign-in──▶ Fetching ──▶ NoConflict ──▶ Resolved
//!                       │
//!                       └──────▶ ConflictPending ──use_local / use_remote──▶ Resolved
//! ```
//!
//! The remote fetch never holds the state lock. Every sign-in bumps an auth
//! generation and every explicit choice bumps a choice generation; a fetch whose
//! generation is stale when it returns is discarded.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{DevicePreferences, StyleApplicator};
use crate::domain::accessibility::{
    reconcile, AccessibilityProfile, Conflict, Language, ProfileSource, ReconcilerState,
    Reconciliation, ThemePreference,
};
use crate::domain::foundation::{StateMachine, UserId};
use crate::ports::{PreferenceStore, RemoteProfileService, StyleTarget};

/// Everything observers need to render the current presentation state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSnapshot {
    pub user: Option<UserId>,
    /// Profile currently rendered on the style target.
    pub profile: AccessibilityProfile,
    pub theme: ThemePreference,
    pub language: Language,
    pub state: ReconcilerState,
    /// Present only while `state` is `ConflictPending`.
    pub conflict: Option<Conflict>,
}

impl Default for ProfileSnapshot {
    fn default() -> Self {
        Self {
            user: None,
            profile: AccessibilityProfile::None,
            theme: ThemePreference::Light,
            language: Language::default(),
            state: ReconcilerState::Idle,
            conflict: None,
        }
    }
}

/// Handle to a fire-and-forget remote profile update.
///
/// Dropping it does not cancel the update.
#[derive(Debug)]
pub struct RemoteSync {
    handle: Option<JoinHandle<bool>>,
}

impl RemoteSync {
    fn skipped() -> Self {
        Self { handle: None }
    }

    /// Whether an update was sent (there is a signed-in user).
    pub fn is_scheduled(&self) -> bool {
        self.handle.is_some()
    }

    /// Waits for the update. `true` only if it was sent and succeeded.
    pub async fn wait(self) -> bool {
        match self.handle {
            Some(handle) => handle.await.unwrap_or(false),
            None => false,
        }
    }
}

/// Outcome of a conflict choice.
#[derive(Debug)]
pub struct Resolution {
    /// Profile now applied, or `None` if nothing changed.
    pub applied: Option<AccessibilityProfile>,
    pub remote_sync: RemoteSync,
}

impl Resolution {
    fn unchanged() -> Self {
        Self {
            applied: None,
            remote_sync: RemoteSync::skipped(),
        }
    }
}

struct SyncState {
    snapshot: ProfileSnapshot,
    auth_generation: u64,
    choice_generation: u64,
}

impl SyncState {
    fn move_to(&mut self, target: ReconcilerState) {
        let from = self.snapshot.state;
        match from.transition_to(target) {
            Ok(next) => {
                debug!(from = ?from, to = ?next, "Reconciler transition");
                self.snapshot.state = next;
            }
            Err(e) => warn!(error = %e, "Rejected reconciler transition"),
        }
    }

    /// Back to `Idle` from wherever the previous identity left off.
    fn reset(&mut self) {
        if self.snapshot.state != ReconcilerState::Idle {
            debug!(from = ?self.snapshot.state, "Reconciler reset");
        }
        self.snapshot.state = ReconcilerState::Idle;
        self.snapshot.conflict = None;
    }

    /// An explicit choice settles any pending conflict.
    fn settle_conflict(&mut self) {
        self.snapshot.conflict = None;
        if self.snapshot.state.is_conflict_pending() {
            self.move_to(ReconcilerState::Resolved);
        }
    }
}

pub struct ProfileSync {
    preferences: DevicePreferences,
    remote: Arc<dyn RemoteProfileService>,
    applicator: StyleApplicator,
    state: Mutex<SyncState>,
    published: watch::Sender<ProfileSnapshot>,
}

impl ProfileSync {
    pub fn new(
        store: Arc<dyn PreferenceStore>,
        remote: Arc<dyn RemoteProfileService>,
        target: Arc<dyn StyleTarget>,
    ) -> Self {
        let (published, _) = watch::channel(ProfileSnapshot::default());
        Self {
            preferences: DevicePreferences::new(store),
            remote,
            applicator: StyleApplicator::new(target),
            state: Mutex::new(SyncState {
                snapshot: ProfileSnapshot::default(),
                auth_generation: 0,
                choice_generation: 0,
            }),
            published,
        }
    }

    /// Applies what the device has stored. Call once before any sign-in;
    /// once a user is signed in or a reconciliation has started it does nothing.
    ///
    /// A missing theme follows `system_prefers_dark`; a missing language is Spanish.
    pub async fn initialize(&self, system_prefers_dark: bool) {
        let profile = self.preferences.profile().await.unwrap_or_default();
        let stored_theme = self.preferences.theme().await;
        let theme = ThemePreference::resolve(stored_theme.as_deref(), system_prefers_dark);
        let stored_language = self.preferences.language().await;
        let language = Language::resolve(stored_language.as_deref());

        let mut state = self.state.lock().await;
        if state.snapshot.user.is_some() || state.snapshot.state != ReconcilerState::Idle {
            debug!(
                state = ?state.snapshot.state,
                "Session already active, device preferences not re-applied"
            );
            return;
        }
        self.applicator.apply_profile(profile);
        self.applicator.apply_theme(theme);
        state.snapshot.profile = profile;
        state.snapshot.theme = theme;
        state.snapshot.language = language;
        debug!(profile = %profile, theme = %theme, language = %language, "Device preferences applied");
        self.publish(&state);
    }

    pub fn snapshot(&self) -> ProfileSnapshot {
        self.published.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProfileSnapshot> {
        self.published.subscribe()
    }

    /// Authentication changed. `None` is sign-out.
    ///
    /// A new identity starts a reconciliation and returns when it has finished
    /// or been superseded. The same identity again is ignored.
    pub async fn on_auth_changed(&self, user: Option<UserId>) {
        match user {
            Some(user) => self.reconcile_for(user).await,
            None => self.sign_out().await,
        }
    }

    async fn sign_out(&self) {
        let mut state = self.state.lock().await;
        let Some(previous) = state.snapshot.user.take() else {
            return;
        };
        state.auth_generation += 1;
        state.choice_generation += 1;
        state.reset();
        info!(user_id = %previous.short(), "Signed out, reconciliation cleared");
        self.publish(&state);
    }

    async fn reconcile_for(&self, user: UserId) {
        let generation = {
            let mut state = self.state.lock().await;
            if state.snapshot.user.as_ref() == Some(&user) {
                debug!(user_id = %user.short(), "Identity unchanged, reconciliation not restarted");
                return;
            }
            state.auth_generation += 1;
            state.choice_generation += 1;
            state.snapshot.user = Some(user.clone());
            state.reset();
            state.move_to(ReconcilerState::Fetching);
            self.publish(&state);
            state.auth_generation
        };

        let remote = match self.remote.fetch(&user).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(user_id = %user.short(), error = %e, "Remote profile fetch failed, using device preference");
                None
            }
        };
        let local = self.preferences.profile().await;

        let mut state = self.state.lock().await;
        if state.auth_generation != generation {
            debug!(user_id = %user.short(), "Discarding reconciliation for superseded identity");
            return;
        }

        let decision = reconcile(local, remote);
        state.move_to(decision.next_state());
        match decision {
            Reconciliation::Conflict(conflict) => {
                info!(
                    user_id = %user.short(),
                    local = %conflict.local,
                    remote = %conflict.remote,
                    "Profile conflict awaiting user choice"
                );
                state.snapshot.conflict = Some(conflict);
            }
            Reconciliation::Apply { profile, source } => {
                self.applicator.apply_profile(profile);
                state.snapshot.profile = profile;
                if source == ProfileSource::Remote {
                    self.preferences.save_profile(profile).await;
                }
                state.move_to(ReconcilerState::Resolved);
                info!(user_id = %user.short(), profile = %profile, source = ?source, "Profile reconciled");
            }
            Reconciliation::Consistent(profile) => {
                self.applicator.apply_profile(profile);
                state.snapshot.profile = profile;
                state.move_to(ReconcilerState::Resolved);
                info!(user_id = %user.short(), profile = %profile, "Profile already in sync");
            }
        }
        self.publish(&state);
    }

    /// Keep the device preference and push it to the account.
    ///
    /// Applies immediately; the remote update runs in the background.
    pub async fn use_local(&self) -> Resolution {
        let stored = self.preferences.profile().await;

        let mut state = self.state.lock().await;
        state.choice_generation += 1;
        let profile = stored
            .or(state.snapshot.conflict.map(|conflict| conflict.local))
            .unwrap_or(state.snapshot.profile);

        self.applicator.apply_profile(profile);
        state.snapshot.profile = profile;
        self.preferences.save_profile(profile).await;
        state.settle_conflict();
        let remote_sync = self.push_remote(state.snapshot.user.clone(), profile);
        info!(profile = %profile, "Kept device profile");
        self.publish(&state);

        Resolution {
            applied: Some(profile),
            remote_sync,
        }
    }

    /// Adopt the account's profile, re-fetched now.
    ///
    /// If the fetch fails, or the account has no stored profile, nothing is
    /// applied: the current profile stays and any conflict is settled.
    pub async fn use_remote(&self) -> Resolution {
        let (user, auth_generation, choice_generation) = {
            let mut state = self.state.lock().await;
            let Some(user) = state.snapshot.user.clone() else {
                debug!("No signed-in user, nothing to adopt");
                return Resolution::unchanged();
            };
            state.choice_generation += 1;
            (user, state.auth_generation, state.choice_generation)
        };

        let fetched = match self.remote.fetch(&user).await {
            Ok(Some(profile)) => Some(profile),
            Ok(None) => {
                warn!(user_id = %user.short(), "Account has no stored profile, keeping current profile");
                None
            }
            Err(e) => {
                warn!(user_id = %user.short(), error = %e, "Re-fetch of account profile failed, keeping current profile");
                None
            }
        };

        let mut state = self.state.lock().await;
        if state.auth_generation != auth_generation || state.choice_generation != choice_generation {
            debug!(user_id = %user.short(), "Account profile arrived after a newer choice, discarded");
            return Resolution::unchanged();
        }

        let Some(profile) = fetched else {
            state.settle_conflict();
            self.publish(&state);
            return Resolution::unchanged();
        };

        self.applicator.apply_profile(profile);
        state.snapshot.profile = profile;
        self.preferences.save_profile(profile).await;
        state.settle_conflict();
        info!(user_id = %user.short(), profile = %profile, "Adopted account profile");
        self.publish(&state);

        Resolution {
            applied: Some(profile),
            remote_sync: RemoteSync::skipped(),
        }
    }

    /// Explicit selection from the accessibility menu.
    pub async fn set_profile(&self, profile: AccessibilityProfile) -> RemoteSync {
        let mut state = self.state.lock().await;
        state.choice_generation += 1;
        self.applicator.apply_profile(profile);
        state.snapshot.profile = profile;
        self.preferences.save_profile(profile).await;
        state.settle_conflict();
        let remote_sync = self.push_remote(state.snapshot.user.clone(), profile);
        debug!(profile = %profile, "Profile selected");
        self.publish(&state);
        remote_sync
    }

    pub async fn set_theme(&self, theme: ThemePreference) {
        let mut state = self.state.lock().await;
        self.applicator.apply_theme(theme);
        state.snapshot.theme = theme;
        self.preferences.save_theme(theme).await;
        self.publish(&state);
    }

    pub async fn toggle_theme(&self) -> ThemePreference {
        let mut state = self.state.lock().await;
        let theme = state.snapshot.theme.toggled();
        self.applicator.apply_theme(theme);
        state.snapshot.theme = theme;
        self.preferences.save_theme(theme).await;
        self.publish(&state);
        theme
    }

    pub async fn set_language(&self, language: Language) {
        let mut state = self.state.lock().await;
        state.snapshot.language = language;
        self.preferences.save_language(language).await;
        self.publish(&state);
    }

    pub async fn toggle_language(&self) -> Language {
        let mut state = self.state.lock().await;
        let language = state.snapshot.language.toggled();
        state.snapshot.language = language;
        self.preferences.save_language(language).await;
        self.publish(&state);
        language
    }

    fn push_remote(&self, user: Option<UserId>, profile: AccessibilityProfile) -> RemoteSync {
        let Some(user) = user else {
            return RemoteSync::skipped();
        };
        let remote = Arc::clone(&self.remote);
        let handle = tokio::spawn(async move {
            match remote.update(&user, profile).await {
                Ok(()) => {
                    debug!(user_id = %user.short(), profile = %profile, "Account profile updated");
                    true
                }
                Err(e) => {
                    warn!(user_id = %user.short(), error = %e, "Account profile update failed");
                    false
                }
            }
        });
        RemoteSync {
            handle: Some(handle),
        }
    }

    fn publish(&self, state: &SyncState) {
        self.published.send_replace(state.snapshot.clone());
    }
}
