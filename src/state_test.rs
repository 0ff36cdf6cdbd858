use super::test_helpers::*;
use super::*;
use session::Role;

#[test]
fn new_state_follows_config() {
    let state = AppState::new(ServerConfig { port: 9999, ..ServerConfig::default() });
    assert_eq!(state.config.port, 9999);
}

#[tokio::test]
async fn clones_share_accounts_and_sessions() {
    let state = test_app_state();
    let other = state.clone();
    let (user, token) = seed_user(&state, "a@b.com", Role::Student).await;
    assert_eq!(other.accounts.get(&user.id).await, Some(user.clone()));
    assert_eq!(other.sessions.validate(&token).await, Some(user.id));
}

#[tokio::test]
async fn demo_state_provisions_unknown_logins() {
    let state = demo_app_state();
    let creds = session::Credentials { email: "x@company.com".into(), password: "pw".into() };
    let user = state.accounts.authenticate(&creds).await.unwrap();
    assert_eq!(user.role, Role::Company);
}
