use super::*;

const USER_JSON: &str = r#"{"user":{"id":"u1","email":"a@b.com","name":"Alice","userType":"student","createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}}"#;

#[test]
fn decode_user_response_reads_envelope() {
    let user = decode_user_response(200, USER_JSON).unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(user.display_name, "Alice");
    assert_eq!(user.role, session::Role::Student);
}

#[test]
fn decode_user_response_accepts_created() {
    assert!(decode_user_response(201, USER_JSON).is_ok());
}

#[test]
fn decode_user_response_malformed_success_is_transport() {
    assert!(matches!(decode_user_response(200, "not json"), Err(AuthError::Transport(_))));
}

#[test]
fn decode_user_response_maps_error_codes() {
    let body = r#"{"error":"invalid_credentials","message":"invalid email or password"}"#;
    assert_eq!(decode_user_response(401, body), Err(AuthError::InvalidCredentials));

    let body = r#"{"error":"email_taken","message":"email already registered"}"#;
    assert_eq!(decode_user_response(409, body), Err(AuthError::EmailTaken));

    let body = r#"{"error":"unauthenticated","message":"not signed in"}"#;
    assert_eq!(decode_user_response(401, body), Err(AuthError::Unauthenticated));
}

#[test]
fn decode_user_response_falls_back_to_status() {
    assert_eq!(decode_user_response(401, ""), Err(AuthError::Unauthenticated));
    assert_eq!(decode_user_response(409, "<html>"), Err(AuthError::EmailTaken));
    assert!(matches!(decode_user_response(502, ""), Err(AuthError::Rejected(_))));
}

#[tokio::test]
async fn native_calls_report_transport_error() {
    let service = HttpAuthService;
    let creds = Credentials { email: "a@b.com".into(), password: "pw".into() };
    assert!(matches!(service.authenticate(&creds).await, Err(AuthError::Transport(_))));
    assert!(matches!(fetch_current_user().await, Err(AuthError::Transport(_))));
}
