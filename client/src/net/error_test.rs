use super::*;

#[test]
fn success_statuses_pass() {
    assert_eq!(classify_response(200, "{}"), Ok(()));
    assert_eq!(classify_response(204, ""), Ok(()));
}

#[test]
fn unauthorized_is_session_expired() {
    assert_eq!(classify_response(401, r#"{"error":"jwt expired"}"#), Err(ApiError::SessionExpired));
}

#[test]
fn payment_required_is_limit_exceeded() {
    assert_eq!(
        classify_response(402, r#"{"message":"Free plan allows 3 imports"}"#),
        Err(ApiError::LimitExceeded { message: Some("Free plan allows 3 imports".to_owned()) })
    );
    assert_eq!(classify_response(402, ""), Err(ApiError::LimitExceeded { message: None }));
}

#[test]
fn limit_marker_in_body_wins_over_status() {
    assert_eq!(
        classify_response(403, r#"{"error":"LIMIT_EXCEEDED"}"#),
        Err(ApiError::LimitExceeded { message: None })
    );
    assert_eq!(
        classify_response(200, r#"{"error":"LIMIT_EXCEEDED","message":"Upgrade"}"#),
        Err(ApiError::LimitExceeded { message: Some("Upgrade".to_owned()) })
    );
}

#[test]
fn other_failures_carry_server_message() {
    assert_eq!(
        classify_response(500, r#"{"error":"database down"}"#),
        Err(ApiError::Http { status: 500, message: Some("database down".to_owned()) })
    );
    assert_eq!(
        classify_response(404, "<html>not found</html>"),
        Err(ApiError::Http { status: 404, message: None })
    );
}

#[test]
fn user_messages_route_by_kind() {
    assert!(ApiError::SessionExpired.user_message().contains("sign in"));
    assert!(ApiError::LimitExceeded { message: None }.user_message().contains("Upgrade"));
    assert_eq!(
        ApiError::Http { status: 400, message: Some("Name required".to_owned()) }.user_message(),
        "Name required"
    );
    assert!(ApiError::Network("offline".to_owned()).user_message().contains("connection"));
}

#[test]
fn only_network_errors_are_transport() {
    assert!(ApiError::Network("reset".to_owned()).is_transport());
    assert!(!ApiError::Http { status: 503, message: None }.is_transport());
    assert!(!ApiError::SessionExpired.is_transport());
}
