use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;

use super::*;
use crate::error::{AuthError, StoreError};
use crate::nav::{COMPANY_PROFILE_PATH, STUDENT_DASHBOARD_PATH, STUDENT_PROFILE_PATH};
use crate::service::MockAuthService;
use crate::state::Phase;
use crate::store::MemoryStore;

fn ready(store: MemoryStore) -> SessionContainer<MockAuthService, MemoryStore> {
    let container = SessionContainer::new(MockAuthService::new(), store);
    container.initialize();
    container
}

/// Service whose calls suspend once before settling.
struct SlowAuth;

#[async_trait(?Send)]
impl AuthService for SlowAuth {
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserRecord, AuthError> {
        tokio::task::yield_now().await;
        Ok(UserRecord::new(credentials.email.clone(), "slow", Role::Student))
    }

    async fn create(&self, _registration: &Registration) -> Result<UserRecord, AuthError> {
        tokio::task::yield_now().await;
        Err(AuthError::EmailTaken)
    }

    async fn update(&self, _user: &UserRecord, _patch: &UserPatch) -> Result<UserRecord, AuthError> {
        tokio::task::yield_now().await;
        Err(AuthError::Transport("offline".into()))
    }
}

struct BrokenStore;

impl IdentityStore for BrokenStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable)
    }

    fn save(&self, _raw: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }

    fn clear(&self) {}
}

// =============================================================================
// initialize
// =============================================================================

#[test]
fn initialize_without_stored_user_is_anonymous() {
    let container = ready(MemoryStore::new());
    let session = container.session();
    assert_eq!(session.phase(), Phase::Anonymous);
    assert!(!session.is_loading());
    assert!(session.error().is_none());
}

#[test]
fn new_container_is_uninitialized() {
    let container = SessionContainer::new(MockAuthService::new(), MemoryStore::new());
    let session = container.session();
    assert_eq!(session.phase(), Phase::Uninitialized);
    assert!(session.is_loading());
    assert!(!session.is_authenticated());
}

#[test]
fn initialize_with_corrupt_data_recovers() {
    let store = MemoryStore::with_raw("{not json");
    let container = ready(store.clone());
    let session = container.session();
    assert!(!session.is_authenticated());
    assert!(!session.is_loading());
    assert!(session.error().is_some());
    assert_eq!(store.raw(), None);
}

#[test]
fn initialize_with_wrong_shape_recovers() {
    let container = ready(MemoryStore::with_raw(r#"{"id":"1"}"#));
    assert!(!container.session().is_authenticated());
    assert!(container.session().error().is_some());
}

#[test]
fn initialize_with_unreadable_store_recovers() {
    let container = SessionContainer::new(MockAuthService::new(), BrokenStore);
    container.initialize();
    let session = container.session();
    assert_eq!(session.phase(), Phase::Anonymous);
    assert!(session.error().is_some());
}

#[test]
fn initialize_runs_once() {
    let store = MemoryStore::new();
    let container = ready(store.clone());
    let user = UserRecord::new("late@x.com", "late", Role::Student);
    store.save(&serde_json::to_string(&user).unwrap()).unwrap();
    container.initialize();
    assert!(!container.session().is_authenticated());
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn login_authenticates_with_given_email() {
    let container = ready(MemoryStore::new());
    let nav = container.login("student1@x.com", "pw").await.unwrap();
    let session = container.session();
    assert!(session.is_authenticated());
    assert_eq!(session.user().unwrap().email, "student1@x.com");
    assert_eq!(session.role(), Some(Role::Student));
    assert!(!session.is_loading());
    assert!(session.error().is_none());
    assert_eq!(nav.map(Navigation::path), Some(STUDENT_DASHBOARD_PATH));
}

#[tokio::test]
async fn login_company_email_lands_on_company_dashboard() {
    let container = ready(MemoryStore::new());
    let nav = container.login("hr@company.co", "pw").await.unwrap();
    assert_eq!(nav, Some(Navigation::Dashboard(Role::Company)));
    assert_eq!(container.session().role(), Some(Role::Company));
}

#[tokio::test]
async fn login_trims_email() {
    let container = ready(MemoryStore::new());
    container.login("  a@b.com ", "pw").await.unwrap();
    assert_eq!(container.session().user().unwrap().email, "a@b.com");
}

#[tokio::test]
async fn login_persists_user() {
    let store = MemoryStore::new();
    let container = ready(store.clone());
    container.login("a@b.com", "pw").await.unwrap();
    let stored: UserRecord = serde_json::from_str(&store.raw().unwrap()).unwrap();
    assert_eq!(Some(&stored), container.session().user());
}

#[tokio::test]
async fn login_failure_sets_error() {
    let container = SessionContainer::new(MockAuthService::rejecting(), MemoryStore::new());
    container.initialize();
    let err = container.login("a@b.com", "wrong").await.unwrap_err();
    assert_eq!(err, SessionError::InvalidCredentials);
    let session = container.session();
    assert!(!session.is_authenticated());
    assert!(!session.is_loading());
    assert_eq!(session.error(), Some(SessionError::InvalidCredentials.user_message().as_str()));
}

#[tokio::test]
async fn login_blank_input_never_reaches_service() {
    let container = ready(MemoryStore::new());
    let err = container.login("   ", "pw").await.unwrap_err();
    assert_eq!(err, SessionError::MissingField("email address"));
    let err = container.login("a@b.com", "").await.unwrap_err();
    assert_eq!(err, SessionError::MissingField("password"));
    assert_eq!(container.auth().calls(), 0);
    assert!(!container.session().is_loading());
}

#[tokio::test]
async fn next_attempt_clears_error() {
    let container = ready(MemoryStore::new());
    let _ = container.login("", "").await;
    assert!(container.session().error().is_some());
    container.login("a@b.com", "pw").await.unwrap();
    assert!(container.session().error().is_none());
}

#[tokio::test]
async fn login_before_initialize_still_works() {
    let container = SessionContainer::new(MockAuthService::new(), MemoryStore::new());
    container.login("a@b.com", "pw").await.unwrap();
    assert_eq!(container.session().phase(), Phase::Authenticated(Role::Student));
}

#[tokio::test]
async fn second_call_while_pending_is_busy() {
    let container = SessionContainer::new(SlowAuth, MemoryStore::new());
    container.initialize();
    let (first, second) = tokio::join!(
        container.login("first@x.com", "pw"),
        container.login("second@x.com", "pw"),
    );
    assert!(first.is_ok());
    assert_eq!(second, Err(SessionError::Busy));
    assert_eq!(container.session().user().unwrap().email, "first@x.com");
    assert!(container.session().error().is_none());
}

// =============================================================================
// register
// =============================================================================

#[tokio::test]
async fn register_student_goes_to_student_profile() {
    let container = ready(MemoryStore::new());
    let nav = container.register("s@x.com", "pw", "Sam", Role::Student).await.unwrap();
    assert_eq!(nav.map(Navigation::path), Some(STUDENT_PROFILE_PATH));
    let session = container.session();
    assert_eq!(session.user().unwrap().display_name, "Sam");
    assert_eq!(session.role(), Some(Role::Student));
}

#[tokio::test]
async fn register_company_goes_to_company_profile() {
    let container = ready(MemoryStore::new());
    let nav = container.register("hr@acme.com", "pw", "Acme", Role::Company).await.unwrap();
    assert_eq!(nav.map(Navigation::path), Some(COMPANY_PROFILE_PATH));
}

#[tokio::test]
async fn register_admin_has_no_navigation() {
    let container = ready(MemoryStore::new());
    let nav = container.register("root@x.com", "pw", "Root", Role::Admin).await.unwrap();
    assert_eq!(nav, None);
    assert!(container.session().is_authenticated());
}

#[tokio::test]
async fn register_requires_name() {
    let container = ready(MemoryStore::new());
    let err = container.register("a@b.com", "pw", " ", Role::Student).await.unwrap_err();
    assert_eq!(err, SessionError::MissingField("name"));
    assert!(!container.session().is_authenticated());
}

#[tokio::test]
async fn register_service_failure_surfaces() {
    let container = SessionContainer::new(SlowAuth, MemoryStore::new());
    container.initialize();
    let err = container.register("a@b.com", "pw", "A", Role::Student).await.unwrap_err();
    assert_eq!(err, SessionError::EmailTaken);
    assert!(container.session().error().is_some());
    assert!(!container.session().is_loading());
}

// =============================================================================
// logout
// =============================================================================

#[tokio::test]
async fn logout_from_authenticated() {
    let store = MemoryStore::new();
    let container = ready(store.clone());
    container.login("a@b.com", "pw").await.unwrap();
    let nav = container.logout();
    assert_eq!(nav, Navigation::Landing);
    let session = container.session();
    assert!(session.user().is_none());
    assert!(!session.is_authenticated());
    assert!(session.error().is_none());
    assert_eq!(store.raw(), None);
}

#[tokio::test]
async fn logout_after_failure_clears_error() {
    let container = SessionContainer::new(MockAuthService::rejecting(), MemoryStore::new());
    container.initialize();
    let _ = container.login("a@b.com", "pw").await;
    container.logout();
    assert!(container.session().error().is_none());
}

#[test]
fn logout_when_uninitialized() {
    let container = SessionContainer::new(MockAuthService::new(), MemoryStore::with_raw("junk"));
    container.logout();
    let session = container.session();
    assert_eq!(session.phase(), Phase::Anonymous);
    assert!(session.error().is_none());
    assert!(!session.is_loading());
}

// =============================================================================
// update_user
// =============================================================================

#[tokio::test]
async fn update_without_session_fails() {
    let container = ready(MemoryStore::new());
    let err = container.update_user(&UserPatch { display_name: Some("x".into()), email: None }).await.unwrap_err();
    assert_eq!(err, SessionError::UpdateWithoutSession);
    let session = container.session();
    assert!(session.user().is_none());
    assert!(session.error().is_some());
    assert!(!session.is_loading());
    assert_eq!(container.auth().calls(), 0);
}

#[tokio::test]
async fn update_merges_and_persists() {
    let store = MemoryStore::new();
    let container = ready(store.clone());
    container.login("a@b.com", "pw").await.unwrap();
    let before = container.session().user().cloned().unwrap();

    let updated = container
        .update_user(&UserPatch { display_name: Some("Alice".into()), email: None })
        .await
        .unwrap();
    assert_eq!(updated.id, before.id);
    assert_eq!(updated.display_name, "Alice");
    assert_eq!(updated.created_at, before.created_at);
    assert_eq!(container.session().user(), Some(&updated));

    let stored: UserRecord = serde_json::from_str(&store.raw().unwrap()).unwrap();
    assert_eq!(stored.display_name, "Alice");
}

#[tokio::test]
async fn update_failure_keeps_prior_user() {
    let container = SessionContainer::new(SlowAuth, MemoryStore::new());
    container.initialize();
    container.login("a@b.com", "pw").await.unwrap();
    let err = container.update_user(&UserPatch::default()).await.unwrap_err();
    assert_eq!(err, SessionError::Service("offline".into()));
    let session = container.session();
    assert_eq!(session.user().unwrap().email, "a@b.com");
    assert!(session.error().is_some());
}

// =============================================================================
// hydration round-trip and listeners
// =============================================================================

#[tokio::test]
async fn login_then_fresh_container_restores_same_user() {
    let store = MemoryStore::new();
    let first = ready(store.clone());
    first.login("student1@x.com", "pw").await.unwrap();
    let original = first.session().user().cloned().unwrap();

    let second = ready(store);
    let session = second.session();
    assert!(session.is_authenticated());
    assert_eq!(session.user(), Some(&original));
    assert_eq!(session.phase(), Phase::Authenticated(Role::Student));
}

#[tokio::test]
async fn listener_sees_every_transition() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let container = SessionContainer::new(MockAuthService::new(), MemoryStore::new())
        .with_listener(move |s| sink.borrow_mut().push(s.phase()));

    container.initialize();
    container.login("a@b.com", "pw").await.unwrap();
    container.logout();

    assert_eq!(
        *seen.borrow(),
        vec![
            Phase::Anonymous,
            Phase::Loading,
            Phase::Authenticated(Role::Student),
            Phase::Anonymous,
        ]
    );
}

// =============================================================================
// service forgets the user
// =============================================================================

/// Service that accepts logins but has dropped the session by update time.
struct ExpiredAuth;

#[async_trait(?Send)]
impl AuthService for ExpiredAuth {
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserRecord, AuthError> {
        Ok(UserRecord::new(credentials.email.clone(), "expired", Role::Student))
    }

    async fn create(&self, _registration: &Registration) -> Result<UserRecord, AuthError> {
        Err(AuthError::Unauthenticated)
    }

    async fn update(&self, _user: &UserRecord, _patch: &UserPatch) -> Result<UserRecord, AuthError> {
        Err(AuthError::Unauthenticated)
    }
}

#[tokio::test]
async fn update_rejected_as_unauthenticated_signs_out() {
    let store = MemoryStore::new();
    let container = SessionContainer::new(ExpiredAuth, store.clone());
    container.initialize();
    container.login("a@b.com", "pw").await.unwrap();
    assert!(store.raw().is_some());

    let err = container
        .update_user(&UserPatch { display_name: Some("x".into()), email: None })
        .await
        .unwrap_err();
    assert_eq!(err, SessionError::SessionExpired);

    let session = container.session();
    assert!(!session.is_authenticated());
    assert!(!session.is_loading());
    assert_eq!(session.phase(), Phase::Anonymous);
    assert_eq!(session.error(), Some("Your session has expired. Please sign in again."));
    assert!(store.raw().is_none());
}

#[tokio::test]
async fn unauthenticated_answer_on_sign_in_reads_as_bad_credentials() {
    let container = SessionContainer::new(ExpiredAuth, MemoryStore::new());
    container.initialize();
    let err = container.register("a@b.com", "pw", "A", Role::Student).await.unwrap_err();
    assert_eq!(err, SessionError::InvalidCredentials);
    assert_eq!(container.session().error(), Some("Incorrect email address or password."));
}

#[tokio::test]
async fn bare_401_on_login_reads_as_bad_credentials() {
    /// Service whose login gets a 401 with no decodable body.
    struct Bare401;

    #[async_trait(?Send)]
    impl AuthService for Bare401 {
        async fn authenticate(&self, _credentials: &Credentials) -> Result<UserRecord, AuthError> {
            Err(crate::wire::status_to_auth_error(401))
        }

        async fn create(&self, _registration: &Registration) -> Result<UserRecord, AuthError> {
            Err(crate::wire::status_to_auth_error(401))
        }

        async fn update(&self, _user: &UserRecord, _patch: &UserPatch) -> Result<UserRecord, AuthError> {
            Err(crate::wire::status_to_auth_error(401))
        }
    }

    let container = SessionContainer::new(Bare401, MemoryStore::new());
    container.initialize();
    let err = container.login("a@b.com", "pw").await.unwrap_err();
    assert_eq!(err, SessionError::InvalidCredentials);
    assert_eq!(container.session().error(), Some("Incorrect email address or password."));
}
