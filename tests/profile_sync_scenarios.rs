//! Integration tests for accessibility profile reconciliation.
//!
//! These tests drive a full `ProfileSync` session over the in-memory and file
//! adapters:
//! 1. Sign-in reconciliation between device and account
//! 2. Conflict choices and their persistence
//! 3. Identity changes and out-of-order responses
//! 4. Degraded storage and remote failures

use std::sync::Arc;
use std::time::Duration;

use ecosense::adapters::memory::InMemoryRemoteProfileService;
use ecosense::adapters::storage::{FilePreferenceStore, InMemoryPreferenceStore};
use ecosense::adapters::style::InMemoryStyleTarget;
use ecosense::application::ProfileSync;
use ecosense::domain::accessibility::{
    AccessibilityProfile, Conflict, Language, ReconcilerState, ThemePreference,
};
use ecosense::domain::foundation::UserId;
use ecosense::ports::PreferenceKey;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Harness {
    sync: Arc<ProfileSync>,
    store: InMemoryPreferenceStore,
    remote: InMemoryRemoteProfileService,
    target: InMemoryStyleTarget,
}

impl Harness {
    async fn start(store: InMemoryPreferenceStore, remote: InMemoryRemoteProfileService) -> Self {
        let target = InMemoryStyleTarget::new();
        let sync = Arc::new(ProfileSync::new(
            Arc::new(store.clone()),
            Arc::new(remote.clone()),
            Arc::new(target.clone()),
        ));
        sync.initialize(false).await;
        Self {
            sync,
            store,
            remote,
            target,
        }
    }

    async fn stored_profile(&self) -> Option<String> {
        self.store.peek(PreferenceKey::AccessibilityProfile).await
    }

    /// Root style matches exactly what `profile` sets.
    fn assert_rendered(&self, profile: AccessibilityProfile) {
        let expected = ecosense::domain::accessibility::style_for(profile);
        let profile_classes: Vec<String> = self
            .target
            .classes()
            .into_iter()
            .filter(|class| class.starts_with("perfil-"))
            .collect();
        assert_eq!(
            profile_classes,
            expected.class.map(str::to_string).into_iter().collect::<Vec<_>>(),
            "classes for {profile:?}"
        );
        assert_eq!(self.target.properties().len(), expected.variables.len());
        for (variable, value) in expected.variables {
            assert_eq!(
                self.target.property(variable.css_name()).as_deref(),
                Some(*value)
            );
        }
    }
}

fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

fn local(profile: AccessibilityProfile) -> InMemoryPreferenceStore {
    InMemoryPreferenceStore::with_entries([(
        PreferenceKey::AccessibilityProfile,
        profile.wire_name().to_string(),
    )])
}

async fn wait_for_fetches(remote: &InMemoryRemoteProfileService, count: usize) {
    for _ in 0..400 {
        if remote.fetch_count() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("expected {count} fetches, saw {}", remote.fetch_count());
}

// =============================================================================
// Sign-in Reconciliation
// =============================================================================

#[tokio::test]
async fn absent_local_adopts_account_profile_or_none() {
    let remotes = AccessibilityProfile::ALL
        .into_iter()
        .map(Some)
        .chain(std::iter::once(None));

    for remote_profile in remotes {
        let remote = InMemoryRemoteProfileService::new();
        if let Some(profile) = remote_profile {
            remote.set_profile(user("ana"), profile).await;
        }
        let h = Harness::start(InMemoryPreferenceStore::new(), remote).await;

        h.sync.on_auth_changed(Some(user("ana"))).await;

        let expected = remote_profile.unwrap_or_default();
        let snapshot = h.sync.snapshot();
        assert_eq!(snapshot.profile, expected);
        assert_eq!(snapshot.state, ReconcilerState::Resolved);
        assert!(snapshot.conflict.is_none());
        h.assert_rendered(expected);
    }
}

#[tokio::test]
async fn account_motor_profile_applied_and_stored_on_fresh_device() {
    let remote =
        InMemoryRemoteProfileService::new().with_profile(user("ana"), AccessibilityProfile::Motor);
    let h = Harness::start(InMemoryPreferenceStore::new(), remote).await;

    h.sync.on_auth_changed(Some(user("ana"))).await;

    assert_eq!(h.sync.snapshot().profile, AccessibilityProfile::Motor);
    assert_eq!(h.stored_profile().await.as_deref(), Some("motriz"));
    assert!(h.target.has_class("perfil-motriz"));
}

#[tokio::test]
async fn equal_profiles_resolve_without_conflict() {
    let remote = InMemoryRemoteProfileService::new()
        .with_profile(user("ana"), AccessibilityProfile::Cognitive);
    let h = Harness::start(local(AccessibilityProfile::Cognitive), remote).await;

    h.sync.on_auth_changed(Some(user("ana"))).await;

    let snapshot = h.sync.snapshot();
    assert!(snapshot.conflict.is_none());
    assert_eq!(snapshot.state, ReconcilerState::Resolved);
    assert_eq!(snapshot.profile, AccessibilityProfile::Cognitive);
    assert!(h.remote.updates().is_empty());
}

#[tokio::test]
async fn differing_profiles_raise_conflict_and_keep_device_profile() {
    let remote =
        InMemoryRemoteProfileService::new().with_profile(user("ana"), AccessibilityProfile::Motor);
    let h = Harness::start(local(AccessibilityProfile::Visual), remote).await;

    h.sync.on_auth_changed(Some(user("ana"))).await;

    let snapshot = h.sync.snapshot();
    assert_eq!(snapshot.state, ReconcilerState::ConflictPending);
    assert_eq!(
        snapshot.conflict,
        Some(Conflict {
            local: AccessibilityProfile::Visual,
            remote: AccessibilityProfile::Motor,
        })
    );
    assert_eq!(snapshot.profile, AccessibilityProfile::Visual);
    h.assert_rendered(AccessibilityProfile::Visual);
    assert_eq!(h.stored_profile().await.as_deref(), Some("visual"));
    assert!(h.remote.updates().is_empty());
}

#[tokio::test]
async fn failed_fetch_keeps_device_profile_without_conflict() {
    let remote = InMemoryRemoteProfileService::new()
        .with_profile(user("ana"), AccessibilityProfile::Cognitive);
    remote.set_fail_fetch(true);
    let h = Harness::start(local(AccessibilityProfile::Auditory), remote).await;

    h.sync.on_auth_changed(Some(user("ana"))).await;

    let snapshot = h.sync.snapshot();
    assert_eq!(snapshot.profile, AccessibilityProfile::Auditory);
    assert!(snapshot.conflict.is_none());
    assert_eq!(snapshot.state, ReconcilerState::Resolved);
    h.assert_rendered(AccessibilityProfile::Auditory);
}

#[tokio::test]
async fn applied_profile_untouched_while_fetching() {
    let remote =
        InMemoryRemoteProfileService::new().with_profile(user("ana"), AccessibilityProfile::Motor);
    remote.pause_fetches();
    let h = Harness::start(local(AccessibilityProfile::Visual), remote).await;
    let mut updates = h.sync.subscribe();

    let sync = Arc::clone(&h.sync);
    let sign_in = tokio::spawn(async move { sync.on_auth_changed(Some(user("ana"))).await });
    wait_for_fetches(&h.remote, 1).await;

    assert!(updates.borrow_and_update().state.is_fetching());
    h.assert_rendered(AccessibilityProfile::Visual);

    h.remote.release_fetches(1);
    sign_in.await.unwrap();
    assert_eq!(h.sync.snapshot().state, ReconcilerState::ConflictPending);
}

// =============================================================================
// Conflict Choices
// =============================================================================

#[tokio::test]
async fn use_local_twice_matches_once() {
    let remote = InMemoryRemoteProfileService::new()
        .with_profile(user("ana"), AccessibilityProfile::Cognitive);
    let h = Harness::start(local(AccessibilityProfile::Visual), remote).await;
    h.sync.on_auth_changed(Some(user("ana"))).await;

    let first = h.sync.use_local().await;
    assert!(first.remote_sync.wait().await);
    let after_once = (
        h.sync.snapshot().profile,
        h.stored_profile().await,
        h.remote.stored_profile(&user("ana")).await,
        h.target.properties(),
    );

    let second = h.sync.use_local().await;
    assert!(second.remote_sync.wait().await);
    let after_twice = (
        h.sync.snapshot().profile,
        h.stored_profile().await,
        h.remote.stored_profile(&user("ana")).await,
        h.target.properties(),
    );

    assert_eq!(after_once, after_twice);
    assert_eq!(after_twice.0, AccessibilityProfile::Visual);
    assert_eq!(after_twice.2, Some(AccessibilityProfile::Visual));
    assert!(h.sync.snapshot().conflict.is_none());
}

#[tokio::test]
async fn use_remote_applies_and_stores_account_profile() {
    let remote = InMemoryRemoteProfileService::new()
        .with_profile(user("ana"), AccessibilityProfile::Cognitive);
    let h = Harness::start(local(AccessibilityProfile::Visual), remote).await;
    h.sync.on_auth_changed(Some(user("ana"))).await;

    let resolution = h.sync.use_remote().await;

    assert_eq!(resolution.applied, Some(AccessibilityProfile::Cognitive));
    assert!(!resolution.remote_sync.is_scheduled());
    h.assert_rendered(AccessibilityProfile::Cognitive);
    assert_eq!(h.stored_profile().await.as_deref(), Some("cognitiva"));
    let snapshot = h.sync.snapshot();
    assert!(snapshot.conflict.is_none());
    assert_eq!(snapshot.state, ReconcilerState::Resolved);
}

#[tokio::test]
async fn use_remote_failure_keeps_device_profile_and_settles_conflict() {
    let remote = InMemoryRemoteProfileService::new()
        .with_profile(user("ana"), AccessibilityProfile::Cognitive);
    let h = Harness::start(local(AccessibilityProfile::Visual), remote).await;
    h.sync.on_auth_changed(Some(user("ana"))).await;
    assert_eq!(h.sync.snapshot().state, ReconcilerState::ConflictPending);
    h.remote.set_fail_fetch(true);

    let resolution = h.sync.use_remote().await;

    assert_eq!(resolution.applied, None);
    assert!(!resolution.remote_sync.is_scheduled());
    let snapshot = h.sync.snapshot();
    assert_eq!(snapshot.state, ReconcilerState::Resolved);
    assert!(snapshot.conflict.is_none());
    assert_eq!(snapshot.profile, AccessibilityProfile::Visual);
    h.assert_rendered(AccessibilityProfile::Visual);
    assert_eq!(h.stored_profile().await.as_deref(), Some("visual"));
}

#[tokio::test]
async fn use_remote_without_account_record_keeps_device_profile() {
    let h = Harness::start(
        local(AccessibilityProfile::Visual),
        InMemoryRemoteProfileService::new(),
    )
    .await;
    h.sync.on_auth_changed(Some(user("ana"))).await;

    let resolution = h.sync.use_remote().await;

    assert_eq!(resolution.applied, None);
    assert_eq!(h.sync.snapshot().state, ReconcilerState::Resolved);
    h.assert_rendered(AccessibilityProfile::Visual);
    assert_eq!(h.stored_profile().await.as_deref(), Some("visual"));
    assert!(h.remote.updates().is_empty());
}

#[tokio::test]
async fn later_use_local_supersedes_in_flight_use_remote() {
    let remote = InMemoryRemoteProfileService::new()
        .with_profile(user("ana"), AccessibilityProfile::Cognitive);
    let h = Harness::start(local(AccessibilityProfile::Visual), remote).await;
    h.sync.on_auth_changed(Some(user("ana"))).await;
    h.remote.pause_fetches();

    let sync = Arc::clone(&h.sync);
    let adopt = tokio::spawn(async move { sync.use_remote().await.applied });
    wait_for_fetches(&h.remote, 2).await;

    let kept = h.sync.use_local().await;
    assert!(kept.remote_sync.wait().await);
    h.remote.release_fetches(1);

    assert_eq!(adopt.await.unwrap(), None);
    assert_eq!(h.sync.snapshot().profile, AccessibilityProfile::Visual);
    h.assert_rendered(AccessibilityProfile::Visual);
    assert_eq!(h.stored_profile().await.as_deref(), Some("visual"));
}

#[tokio::test]
async fn explicit_selection_settles_conflict_and_reaches_account() {
    let remote = InMemoryRemoteProfileService::new()
        .with_profile(user("ana"), AccessibilityProfile::Cognitive);
    let h = Harness::start(local(AccessibilityProfile::Visual), remote).await;
    h.sync.on_auth_changed(Some(user("ana"))).await;

    let sync = h.sync.set_profile(AccessibilityProfile::Motor).await;

    assert!(sync.wait().await);
    assert!(h.sync.snapshot().conflict.is_none());
    assert_eq!(
        h.remote.stored_profile(&user("ana")).await,
        Some(AccessibilityProfile::Motor)
    );
    h.assert_rendered(AccessibilityProfile::Motor);
}

// =============================================================================
// Identity Changes
// =============================================================================

#[tokio::test]
async fn new_identity_clears_previous_conflict() {
    let remote = InMemoryRemoteProfileService::new()
        .with_profile(user("ana"), AccessibilityProfile::Cognitive);
    let h = Harness::start(local(AccessibilityProfile::Visual), remote).await;
    h.sync.on_auth_changed(Some(user("ana"))).await;
    assert!(h.sync.snapshot().conflict.is_some());

    h.sync.on_auth_changed(Some(user("luis"))).await;

    let snapshot = h.sync.snapshot();
    assert_eq!(snapshot.user, Some(user("luis")));
    assert!(snapshot.conflict.is_none());
    assert_eq!(snapshot.profile, AccessibilityProfile::Visual);
    assert_eq!(
        h.remote.stored_profile(&user("luis")).await,
        None,
        "nothing pushed to the new account"
    );
}

#[tokio::test]
async fn stale_fetch_for_previous_identity_is_discarded() {
    let remote = InMemoryRemoteProfileService::new()
        .with_profile(user("ana"), AccessibilityProfile::Motor)
        .with_profile(user("luis"), AccessibilityProfile::Auditory);
    remote.pause_fetches();
    let h = Harness::start(InMemoryPreferenceStore::new(), remote).await;

    let sync = Arc::clone(&h.sync);
    let first = tokio::spawn(async move { sync.on_auth_changed(Some(user("ana"))).await });
    wait_for_fetches(&h.remote, 1).await;

    let sync = Arc::clone(&h.sync);
    let second = tokio::spawn(async move { sync.on_auth_changed(Some(user("luis"))).await });
    wait_for_fetches(&h.remote, 2).await;

    // Ana's response arrives first, after Luis signed in.
    h.remote.release_fetches(1);
    first.await.unwrap();
    assert_eq!(h.sync.snapshot().state, ReconcilerState::Fetching);
    h.assert_rendered(AccessibilityProfile::None);

    h.remote.release_fetches(1);
    second.await.unwrap();
    assert_eq!(h.remote.fetched_users(), vec![user("ana"), user("luis")]);

    let snapshot = h.sync.snapshot();
    assert_eq!(snapshot.user, Some(user("luis")));
    assert_eq!(snapshot.profile, AccessibilityProfile::Auditory);
    h.assert_rendered(AccessibilityProfile::Auditory);
    assert_eq!(h.stored_profile().await.as_deref(), Some("auditiva"));
}

#[tokio::test]
async fn same_identity_again_does_not_refetch() {
    let remote =
        InMemoryRemoteProfileService::new().with_profile(user("ana"), AccessibilityProfile::Motor);
    let h = Harness::start(InMemoryPreferenceStore::new(), remote).await;

    h.sync.on_auth_changed(Some(user("ana"))).await;
    h.sync.on_auth_changed(Some(user("ana"))).await;

    assert_eq!(h.remote.fetch_count(), 1);
}

#[tokio::test]
async fn sign_out_resets_state_and_keeps_applied_profile() {
    let remote = InMemoryRemoteProfileService::new()
        .with_profile(user("ana"), AccessibilityProfile::Cognitive);
    let h = Harness::start(local(AccessibilityProfile::Visual), remote).await;
    h.sync.on_auth_changed(Some(user("ana"))).await;

    h.sync.on_auth_changed(None).await;

    let snapshot = h.sync.snapshot();
    assert_eq!(snapshot.user, None);
    assert_eq!(snapshot.state, ReconcilerState::Idle);
    assert!(snapshot.conflict.is_none());
    assert_eq!(snapshot.profile, AccessibilityProfile::Visual);

    // Signed out: choices stay on the device.
    let sync = h.sync.set_profile(AccessibilityProfile::Motor).await;
    assert!(!sync.is_scheduled());
}

// =============================================================================
// Degraded Environments
// =============================================================================

#[tokio::test]
async fn unavailable_storage_never_fails_the_session() {
    let remote = InMemoryRemoteProfileService::new()
        .with_profile(user("ana"), AccessibilityProfile::Cognitive);
    let h = Harness::start(InMemoryPreferenceStore::unavailable(), remote).await;

    h.sync.on_auth_changed(Some(user("ana"))).await;
    assert_eq!(h.sync.snapshot().profile, AccessibilityProfile::Cognitive);

    let sync = h.sync.set_profile(AccessibilityProfile::Visual).await;
    assert!(sync.wait().await);
    h.sync.toggle_theme().await;
    h.sync.toggle_language().await;

    h.assert_rendered(AccessibilityProfile::Visual);
    assert!(h.target.has_class("dark"));
    assert_eq!(h.stored_profile().await, None);
}

#[tokio::test]
async fn failed_account_update_keeps_local_choice() {
    let remote = InMemoryRemoteProfileService::new()
        .with_profile(user("ana"), AccessibilityProfile::Cognitive);
    let h = Harness::start(local(AccessibilityProfile::Visual), remote).await;
    h.sync.on_auth_changed(Some(user("ana"))).await;
    h.remote.set_fail_update(true);

    let resolution = h.sync.use_local().await;

    assert!(!resolution.remote_sync.wait().await);
    assert_eq!(h.sync.snapshot().profile, AccessibilityProfile::Visual);
    assert_eq!(h.stored_profile().await.as_deref(), Some("visual"));
    assert_eq!(
        h.remote.stored_profile(&user("ana")).await,
        Some(AccessibilityProfile::Cognitive)
    );
}

#[tokio::test]
async fn preferences_survive_restart_with_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");

    let first = ProfileSync::new(
        Arc::new(FilePreferenceStore::new(&path)),
        Arc::new(InMemoryRemoteProfileService::new()),
        Arc::new(InMemoryStyleTarget::new()),
    );
    first.initialize(false).await;
    let _ = first.set_profile(AccessibilityProfile::Motor).await;
    first.toggle_theme().await;

    let target = InMemoryStyleTarget::new();
    let second = ProfileSync::new(
        Arc::new(FilePreferenceStore::new(&path)),
        Arc::new(InMemoryRemoteProfileService::new()),
        Arc::new(target.clone()),
    );
    second.initialize(false).await;

    let snapshot = second.snapshot();
    assert_eq!(snapshot.profile, AccessibilityProfile::Motor);
    assert!(snapshot.theme.is_dark());
    assert!(target.has_class("perfil-motriz"));
    assert!(target.has_class("dark"));
}

#[tokio::test]
async fn theme_and_language_stay_on_device() {
    let remote =
        InMemoryRemoteProfileService::new().with_profile(user("ana"), AccessibilityProfile::Motor);
    let h = Harness::start(InMemoryPreferenceStore::new(), remote).await;
    h.sync.on_auth_changed(Some(user("ana"))).await;

    h.sync.set_theme(ThemePreference::Dark).await;
    h.sync.set_language(Language::En).await;

    let snapshot = h.sync.snapshot();
    assert_eq!(snapshot.theme, ThemePreference::Dark);
    assert_eq!(snapshot.language, Language::En);
    assert!(h.target.has_class("dark"));
    assert_eq!(h.store.peek(PreferenceKey::Theme).await.as_deref(), Some("dark"));
    assert_eq!(h.store.peek(PreferenceKey::Language).await.as_deref(), Some("en"));
    assert!(h.remote.updates().is_empty());
}
