use keyed_actor::mock::MockClient;
use keyed_actor::FrameworkError;
use order_board::clients::{AuditClient, ProfileClient, RoleRequestClient};
use order_board::clock::fixed_clock;
use order_board::model::{
    AuditAction, AuditId, AuditRecord, Identity, RequestStatus, Role, RoleRequest, UserProfile,
};
use order_board::role_request_actor::{self, RoleRequestError};
use tokio::task::JoinHandle;

/// Real RoleRequest actor; profile and audit actors are mocked.
fn spawn_requests(
    profiles: &MockClient<UserProfile>,
    audit: &MockClient<AuditRecord>,
) -> (RoleRequestClient, JoinHandle<()>) {
    let (actor, client) = role_request_actor::new(8);
    let context = (
        ProfileClient::new(profiles.client()),
        AuditClient::new(audit.client(), 500),
    );
    let handle = tokio::spawn(actor.run(context));
    (client.with_clock(fixed_clock(5_000)), handle)
}

fn admin() -> Identity {
    Identity::new("uid-admin", "admin@canteen.test")
}

fn newcomer() -> Identity {
    Identity::new("uid-ravi", "ravi@canteen.test")
}

fn audit_entry(action: AuditAction) -> AuditRecord {
    AuditRecord {
        action,
        actor_uid: "uid-admin".into(),
        actor_email: "admin@canteen.test".into(),
        target_uid: "uid-ravi".into(),
        target_email: "ravi@canteen.test".into(),
        details: String::new(),
        timestamp: 5_000,
    }
}

#[tokio::test]
async fn test_approval_writes_profile_and_audit() {
    let mut profiles = MockClient::<UserProfile>::new();
    let mut audit = MockClient::<AuditRecord>::new();

    profiles.expect_get("uid-ravi".to_string()).return_ok(None);
    profiles.expect_update("uid-ravi".to_string()).at_version(2).return_ok(UserProfile {
        email: "ravi@canteen.test".into(),
        role: Some(Role::Delivery),
    });
    audit
        .expect_create(AuditId(1))
        .return_ok(audit_entry(AuditAction::RoleApproved));

    let (requests, handle) = spawn_requests(&profiles, &audit);

    let submitted = requests.submit(&newcomer()).await.unwrap();
    assert_eq!(submitted.value.status, RequestStatus::Pending);
    assert_eq!(submitted.value.requested_at, 5_000);

    let decided: RoleRequest = requests
        .approve(Role::Admin, &admin(), "uid-ravi", Role::Delivery)
        .await
        .unwrap();
    assert_eq!(decided.status, RequestStatus::Approved);
    assert_eq!(decided.granted_role, Some(Role::Delivery));
    assert_eq!(decided.decided_by.as_deref(), Some("admin@canteen.test"));
    assert!(requests.pending().await.unwrap().is_empty());

    // A decided request cannot be decided again; no further dependency calls.
    let again = requests.reject(Role::Admin, &admin(), "uid-ravi").await;
    assert_eq!(again.unwrap_err(), RoleRequestError::AlreadyDecided(RequestStatus::Approved));

    profiles.verify();
    audit.verify();

    drop(requests);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_rejection_only_writes_audit() {
    let profiles = MockClient::<UserProfile>::new();
    let mut audit = MockClient::<AuditRecord>::new();
    audit
        .expect_create(AuditId(1))
        .return_ok(audit_entry(AuditAction::RoleRejected));

    let (requests, handle) = spawn_requests(&profiles, &audit);
    requests.submit(&newcomer()).await.unwrap();

    let decided = requests.reject(Role::Admin, &admin(), "uid-ravi").await.unwrap();
    assert_eq!(decided.status, RequestStatus::Rejected);
    assert_eq!(decided.granted_role, None);

    audit.verify();
    drop(requests);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_failed_profile_write_leaves_request_pending() {
    let mut profiles = MockClient::<UserProfile>::new();
    let audit = MockClient::<AuditRecord>::new();
    profiles.expect_get("uid-ravi".to_string()).return_ok(None);
    profiles
        .expect_update("uid-ravi".to_string())
        .return_err(FrameworkError::ActorClosed);

    let (requests, handle) = spawn_requests(&profiles, &audit);
    requests.submit(&newcomer()).await.unwrap();

    let result = requests
        .approve(Role::Admin, &admin(), "uid-ravi", Role::Display)
        .await;
    assert!(matches!(result, Err(RoleRequestError::Profile(_))));

    let pending = requests.pending().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].status, RequestStatus::Pending);

    profiles.verify();
    drop(requests);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_failed_audit_write_restores_previous_role() {
    let mut profiles = MockClient::<UserProfile>::new();
    let mut audit = MockClient::<AuditRecord>::new();
    let before = UserProfile {
        email: "ravi@canteen.test".into(),
        role: Some(Role::Display),
    };
    profiles.expect_get("uid-ravi".to_string()).return_ok(Some(before.clone()));
    profiles.expect_update("uid-ravi".to_string()).at_version(2).return_ok(UserProfile {
        role: Some(Role::Delivery),
        ..before.clone()
    });
    audit.expect_create(AuditId(1)).return_err(FrameworkError::ActorClosed);
    // The restoring write.
    profiles.expect_update("uid-ravi".to_string()).at_version(3).return_ok(before);

    let (requests, handle) = spawn_requests(&profiles, &audit);
    requests.submit(&newcomer()).await.unwrap();

    let result = requests
        .approve(Role::Admin, &admin(), "uid-ravi", Role::Delivery)
        .await;
    assert!(matches!(result, Err(RoleRequestError::Audit(_))));

    let pending = requests.pending().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].granted_role, None);

    profiles.verify();
    audit.verify();
    drop(requests);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_failed_audit_write_removes_created_profile() {
    let mut profiles = MockClient::<UserProfile>::new();
    let mut audit = MockClient::<AuditRecord>::new();
    profiles.expect_get("uid-ravi".to_string()).return_ok(None);
    profiles.expect_update("uid-ravi".to_string()).return_ok(UserProfile {
        email: "ravi@canteen.test".into(),
        role: Some(Role::Menuhub),
    });
    audit.expect_create(AuditId(1)).return_err(FrameworkError::ActorClosed);
    profiles.expect_delete("uid-ravi".to_string()).return_ok(());

    let (requests, handle) = spawn_requests(&profiles, &audit);
    requests.submit(&newcomer()).await.unwrap();

    let result = requests
        .approve(Role::Admin, &admin(), "uid-ravi", Role::Menuhub)
        .await;
    assert!(matches!(result, Err(RoleRequestError::Audit(_))));
    assert_eq!(requests.pending().await.unwrap().len(), 1);

    profiles.verify();
    audit.verify();
    drop(requests);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_guards_run_before_any_dependency_call() {
    let profiles = MockClient::<UserProfile>::new();
    let audit = MockClient::<AuditRecord>::new();
    let (requests, handle) = spawn_requests(&profiles, &audit);
    requests.submit(&newcomer()).await.unwrap();

    let not_admin = requests
        .approve(Role::Counter, &admin(), "uid-ravi", Role::Delivery)
        .await;
    assert_eq!(not_admin.unwrap_err(), RoleRequestError::Unauthorized(Role::Counter));

    let kitchen = requests
        .approve(Role::Admin, &admin(), "uid-ravi", Role::Kitchen)
        .await;
    assert_eq!(kitchen.unwrap_err(), RoleRequestError::NotGrantable(Role::Kitchen));

    let duplicate = requests.submit(&newcomer()).await;
    assert_eq!(duplicate.unwrap_err(), RoleRequestError::AlreadyRequested("uid-ravi".into()));

    let missing = requests.reject(Role::Admin, &admin(), "uid-nobody").await;
    assert_eq!(missing.unwrap_err(), RoleRequestError::NotFound("uid-nobody".into()));

    drop(requests);
    handle.await.unwrap();
}
