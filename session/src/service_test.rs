use super::*;

fn creds(email: &str, password: &str) -> Credentials {
    Credentials { email: email.into(), password: password.into() }
}

#[tokio::test]
async fn mock_login_derives_role_and_name() {
    let svc = MockAuthService::new();
    let user = svc.authenticate(&creds("student1@x.com", "pw")).await.unwrap();
    assert_eq!(user.role, Role::Student);
    assert_eq!(user.display_name, "student1");

    let user = svc.authenticate(&creds("hr@company.com", "pw")).await.unwrap();
    assert_eq!(user.role, Role::Company);
}

#[tokio::test]
async fn mock_login_rejects_blank_password() {
    let svc = MockAuthService::new();
    let err = svc.authenticate(&creds("a@b.com", "")).await.unwrap_err();
    assert_eq!(err, AuthError::InvalidCredentials);
}

#[tokio::test]
async fn rejecting_mock_refuses_everything() {
    let svc = MockAuthService::rejecting();
    let err = svc.authenticate(&creds("a@b.com", "pw")).await.unwrap_err();
    assert_eq!(err, AuthError::InvalidCredentials);
    assert_eq!(svc.calls(), 1);
}

#[tokio::test]
async fn mock_create_echoes_registration() {
    let svc = MockAuthService::new();
    let reg = Registration {
        email: "a@b.com".into(),
        password: "pw".into(),
        display_name: "Acme".into(),
        role: Role::Company,
    };
    let user = svc.create(&reg).await.unwrap();
    assert_eq!(user.email, "a@b.com");
    assert_eq!(user.display_name, "Acme");
    assert_eq!(user.role, Role::Company);
}

#[tokio::test]
async fn mock_update_merges_patch() {
    let svc = MockAuthService::new();
    let user = UserRecord::new("a@b.com", "A", Role::Student);
    let patch = UserPatch { display_name: None, email: Some("new@b.com".into()) };
    let updated = svc.update(&user, &patch).await.unwrap();
    assert_eq!(updated.id, user.id);
    assert_eq!(updated.email, "new@b.com");
    assert_eq!(updated.display_name, "A");
    assert_eq!(svc.calls(), 1);
}
