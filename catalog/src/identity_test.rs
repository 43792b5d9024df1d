use super::*;

#[test]
fn parse_session_reads_tokens() {
    let body = r#"{
        "kind": "identitytoolkit#VerifyPasswordResponse",
        "localId": "uid-1",
        "email": "admin@example.com",
        "displayName": "",
        "idToken": "id-tok",
        "registered": true,
        "refreshToken": "refresh-tok",
        "expiresIn": "3600"
    }"#;
    let session = parse_session(body).unwrap();
    assert_eq!(session.user_id, "uid-1");
    assert_eq!(session.email, "admin@example.com");
    assert_eq!(session.id_token, "id-tok");
    assert_eq!(session.expires_in, 3600);
    assert_eq!(session.issued_at, 0);
}

#[test]
fn parse_session_defaults_missing_lifetime() {
    let body = r#"{"localId":"u","email":"e@x.io","idToken":"t"}"#;
    let session = parse_session(body).unwrap();
    assert_eq!(session.expires_in, 3600);
}

#[test]
fn parse_session_requires_id_token() {
    let body = r#"{"localId":"u","email":"e@x.io"}"#;
    assert!(matches!(parse_session(body), Err(AuthError::Parse(_))));
}

#[test]
fn parse_error_message_reads_envelope() {
    let body = r#"{"error":{"code":400,"message":"INVALID_PASSWORD","errors":[]}}"#;
    assert_eq!(parse_error_message(body), "INVALID_PASSWORD");
}

#[test]
fn parse_error_message_falls_back_to_body() {
    assert_eq!(parse_error_message("Bad Gateway"), "Bad Gateway");
}

#[test]
fn sign_in_request_serializes_camel_case() {
    let body = SignInRequest { email: "a@b.com", password: "secret1", return_secure_token: true };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json, serde_json::json!({ "email": "a@b.com", "password": "secret1", "returnSecureToken": true }));
}

#[test]
fn session_debug_hides_tokens() {
    let session = Session {
        user_id: "u".to_owned(),
        email: "e@x.io".to_owned(),
        id_token: "secret-id".to_owned(),
        expires_in: 60,
        issued_at: 0,
    };
    let debug = format!("{session:?}");
    assert!(!debug.contains("secret-id"));
}
