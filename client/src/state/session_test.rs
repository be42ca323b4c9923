use super::*;

#[test]
fn session_expiry_is_absorbed() {
    let mut session = SessionState::default();
    assert_eq!(session.absorb(&ApiError::SessionExpired), None);
    assert!(session.session_expired);
    assert_eq!(session.upgrade_prompt, None);
}

#[test]
fn missing_token_asks_for_sign_in_not_expiry() {
    let mut session = SessionState::default();
    assert_eq!(session.absorb(&ApiError::MissingToken), None);
    assert!(!session.session_expired);
    assert!(session.sign_in_required);
    assert_eq!(session.notice(), Some(AuthNotice::SignIn));
}

#[test]
fn sign_out_is_not_an_expired_session() {
    let mut session = SessionState { session_expired: true, ..SessionState::default() };
    session.signed_out();
    assert_eq!(session.notice(), Some(AuthNotice::SignIn));
}

#[test]
fn only_a_rejected_token_reports_expiry() {
    let mut session = SessionState::default();
    assert_eq!(session.notice(), None);
    session.absorb(&ApiError::SessionExpired);
    assert_eq!(session.notice(), Some(AuthNotice::Expired));
    session.clear_expired();
    assert_eq!(session.notice(), None);
}

#[test]
fn limit_raises_upgrade_prompt_with_server_message() {
    let mut session = SessionState::default();
    let err = ApiError::LimitExceeded { message: Some("3 imports per month on Free".to_owned()) };
    assert_eq!(session.absorb(&err), None);
    assert_eq!(session.upgrade_prompt.as_deref(), Some("3 imports per month on Free"));
    session.dismiss_upgrade();
    assert_eq!(session.upgrade_prompt, None);
}

#[test]
fn generic_failures_stay_local() {
    let mut session = SessionState::default();
    let err = ApiError::Http { status: 500, message: Some("boom".to_owned()) };
    assert_eq!(session.absorb(&err), Some("boom".to_owned()));
    assert_eq!(session, SessionState::default());

    let err = ApiError::Network("offline".to_owned());
    assert!(session.absorb(&err).is_some());
    assert!(!session.session_expired);
}

#[test]
fn clear_expired_resets_banner() {
    let mut session = SessionState { session_expired: true, sign_in_required: true, upgrade_prompt: None };
    session.clear_expired();
    assert!(!session.session_expired);
    assert!(!session.sign_in_required);
}
