// ═══════════════════════════════════════════════════════════════════
// SessionService Tests — token lifecycle, JWT decoding, expiry
// ═══════════════════════════════════════════════════════════════════

use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;

use trading_dashboard_core::errors::CoreError;
use trading_dashboard_core::models::auth::TokenResponse;
use trading_dashboard_core::services::session::{
    decode_token, is_token_expired, MemoryTokenStore, SessionService, TokenStore, ROLE_KEY,
    TOKEN_KEY, USER_KEY,
};
use trading_dashboard_core::transport::traits::AuthApi;

// ═══════════════════════════════════════════════════════════════════
// Fixtures
// ═══════════════════════════════════════════════════════════════════

/// Unsigned test JWT with the given subject, role and expiry timestamp.
fn jwt(sub: &str, role: &str, exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        serde_json::json!({ "sub": sub, "role": role, "exp": exp })
            .to_string()
            .as_bytes(),
    );
    format!("{header}.{payload}.testsignature")
}

fn future_exp() -> i64 {
    Utc::now().timestamp() + 3600
}

fn past_exp() -> i64 {
    Utc::now().timestamp() - 3600
}

/// Auth API stub that issues a fixed token, or refuses entirely.
struct MockAuthApi {
    token: Option<String>,
}

impl MockAuthApi {
    fn issuing(token: String) -> Self {
        Self { token: Some(token) }
    }

    fn refusing() -> Self {
        Self { token: None }
    }

    fn respond(&self) -> Result<TokenResponse, CoreError> {
        match &self.token {
            Some(token) => Ok(TokenResponse {
                access_token: token.clone(),
            }),
            None => Err(CoreError::Broker {
                message: "Incorrect username or password".to_string(),
            }),
        }
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn login(&self, _username: &str, _password: &str) -> Result<TokenResponse, CoreError> {
        self.respond()
    }

    async fn register(
        &self,
        _username: &str,
        _password: &str,
        _role: &str,
    ) -> Result<TokenResponse, CoreError> {
        self.respond()
    }
}

fn service_issuing(token: String) -> (SessionService, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::new());
    let service = SessionService::new(
        Box::new(MockAuthApi::issuing(token)),
        Arc::clone(&store) as Arc<dyn TokenStore>,
    );
    (service, store)
}

// ═══════════════════════════════════════════════════════════════════
// Login / logout
// ═══════════════════════════════════════════════════════════════════

#[tokio::test]
async fn login_stores_token_and_decoded_claims() {
    let (service, store) = service_issuing(jwt("trader1", "admin", future_exp()));

    service.login("trader1", "hunter2").await.unwrap();

    assert!(store.get(TOKEN_KEY).is_some());
    assert_eq!(store.get(USER_KEY).as_deref(), Some("trader1"));
    assert_eq!(store.get(ROLE_KEY).as_deref(), Some("admin"));
    assert!(service.is_authenticated());
    assert_eq!(service.current_user().as_deref(), Some("trader1"));
    assert_eq!(service.current_role().as_deref(), Some("admin"));
}

#[tokio::test]
async fn failed_login_leaves_the_session_untouched() {
    let store = Arc::new(MemoryTokenStore::new());
    let service = SessionService::new(
        Box::new(MockAuthApi::refusing()),
        Arc::clone(&store) as Arc<dyn TokenStore>,
    );

    let err = service.login("trader1", "wrong").await.unwrap_err();
    assert!(matches!(err, CoreError::Broker { .. }));
    assert!(!service.is_authenticated());
    assert!(store.get(TOKEN_KEY).is_none());
}

#[tokio::test]
async fn register_issues_a_session_like_login() {
    let (service, _store) = service_issuing(jwt("newuser", "viewer", future_exp()));

    service.register("newuser", "pw", "viewer").await.unwrap();

    assert!(service.is_authenticated());
    assert_eq!(service.current_role().as_deref(), Some("viewer"));
}

#[tokio::test]
async fn logout_clears_every_session_key() {
    let (service, store) = service_issuing(jwt("trader1", "admin", future_exp()));
    service.login("trader1", "hunter2").await.unwrap();

    service.logout();

    assert!(!service.is_authenticated());
    assert!(store.get(TOKEN_KEY).is_none());
    assert!(store.get(USER_KEY).is_none());
    assert!(store.get(ROLE_KEY).is_none());
    assert!(service.current_user().is_none());
    assert!(service.current_role().is_none());
}

#[tokio::test]
async fn undecodable_token_is_kept_without_claims() {
    let (service, store) = service_issuing("not-a-jwt".to_string());

    service.login("trader1", "hunter2").await.unwrap();

    // The backend accepted the credentials, so the raw token is stored
    // for request auth even though no claims could be decoded.
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("not-a-jwt"));
    assert!(service.current_user().is_none());
    assert!(service.current_role().is_none());
    // An undecodable token counts as expired.
    assert!(!service.is_authenticated());
}

// ═══════════════════════════════════════════════════════════════════
// Stored-token validation at startup
// ═══════════════════════════════════════════════════════════════════

#[test]
fn expired_stored_token_is_cleared_on_construction() {
    let store = Arc::new(MemoryTokenStore::new());
    store.set(TOKEN_KEY, &jwt("trader1", "admin", past_exp()));
    store.set(USER_KEY, "trader1");
    store.set(ROLE_KEY, "admin");

    let service = SessionService::new(
        Box::new(MockAuthApi::refusing()),
        Arc::clone(&store) as Arc<dyn TokenStore>,
    );

    assert!(!service.is_authenticated());
    assert!(store.get(TOKEN_KEY).is_none());
    assert!(store.get(USER_KEY).is_none());
    assert!(store.get(ROLE_KEY).is_none());
}

#[test]
fn valid_stored_token_survives_construction() {
    let store = Arc::new(MemoryTokenStore::new());
    store.set(TOKEN_KEY, &jwt("trader1", "admin", future_exp()));
    store.set(USER_KEY, "trader1");
    store.set(ROLE_KEY, "admin");

    let service = SessionService::new(
        Box::new(MockAuthApi::refusing()),
        Arc::clone(&store) as Arc<dyn TokenStore>,
    );

    assert!(service.is_authenticated());
    assert_eq!(service.current_user().as_deref(), Some("trader1"));
}

// ═══════════════════════════════════════════════════════════════════
// JWT decoding
// ═══════════════════════════════════════════════════════════════════

#[test]
fn decode_extracts_subject_role_and_expiry() {
    let exp = future_exp();
    let claims = decode_token(&jwt("trader1", "admin", exp)).unwrap();
    assert_eq!(claims.sub, "trader1");
    assert_eq!(claims.role, "admin");
    assert_eq!(claims.exp, exp);
}

#[test]
fn decode_rejects_tokens_without_three_segments() {
    for bad in ["", "onlyone", "two.segments", "a.b.c.d"] {
        let err = decode_token(bad).unwrap_err();
        assert!(matches!(err, CoreError::InvalidToken(_)), "input: {bad:?}");
    }
}

#[test]
fn decode_rejects_garbage_payloads() {
    let err = decode_token("header.!!!not-base64!!!.sig").unwrap_err();
    assert!(matches!(err, CoreError::InvalidToken(_)));

    let not_json = URL_SAFE_NO_PAD.encode(b"plain text");
    let err = decode_token(&format!("header.{not_json}.sig")).unwrap_err();
    assert!(matches!(err, CoreError::InvalidToken(_)));
}

#[test]
fn decode_tolerates_padded_payload_segments() {
    // {"sub":"u","role":"r","exp":32503680000} encodes to a length that
    // needs padding under the padded alphabet; emulate a lenient issuer.
    let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"u","role":"r","exp":32503680000}"#);
    let padded = format!("h.{payload}==.s");
    let claims = decode_token(&padded).unwrap();
    assert_eq!(claims.sub, "u");
}

#[test]
fn expiry_check_treats_boundary_and_garbage_as_expired() {
    assert!(is_token_expired(&jwt("u", "r", past_exp())));
    assert!(is_token_expired(&jwt("u", "r", Utc::now().timestamp())));
    assert!(!is_token_expired(&jwt("u", "r", future_exp())));
    assert!(is_token_expired("garbage"));
}
