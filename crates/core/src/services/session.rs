use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use tracing::info;

use crate::errors::CoreError;
use crate::models::auth::TokenClaims;
use crate::transport::traits::AuthApi;

/// Storage key for the raw bearer token.
pub const TOKEN_KEY: &str = "auth_token";
/// Storage key for the decoded username.
pub const USER_KEY: &str = "user_data";
/// Storage key for the decoded role.
pub const ROLE_KEY: &str = "user_role";

/// Key/value persistence for session state. The browser shell backs this
/// with local storage; tests and native shells use [`MemoryTokenStore`].
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory [`TokenStore`].
#[derive(Default)]
pub struct MemoryTokenStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .expect("token store poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .write()
            .expect("token store poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries
            .write()
            .expect("token store poisoned")
            .remove(key);
    }
}

/// Manages the authentication token and the user/role strings decoded from
/// it.
///
/// The token is a JWT decoded **without verification** — client-side only,
/// for display and the expiry check. Expiry enforcement is a timestamp
/// comparison performed at construction and before treating a stored token
/// as valid; the backend remains the real authority.
pub struct SessionService {
    api: Box<dyn AuthApi>,
    store: Arc<dyn TokenStore>,
}

impl SessionService {
    /// Build the service and validate any previously stored token,
    /// clearing it if it has expired.
    pub fn new(api: Box<dyn AuthApi>, store: Arc<dyn TokenStore>) -> Self {
        let service = Self { api, store };
        if let Some(token) = service.store.get(TOKEN_KEY) {
            if is_token_expired(&token) {
                info!("stored auth token expired, clearing session");
                service.clear();
            }
        }
        service
    }

    /// Log in and persist the issued token plus its decoded claims.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), CoreError> {
        let response = self.api.login(username, password).await?;
        self.store_token(&response.access_token);
        Ok(())
    }

    /// Register a new user and persist the issued token.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: &str,
    ) -> Result<(), CoreError> {
        let response = self.api.register(username, password, role).await?;
        self.store_token(&response.access_token);
        Ok(())
    }

    /// Clear the token and decoded user data.
    pub fn logout(&self) {
        self.clear();
    }

    /// The stored bearer token, if any. Does not check expiry.
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY)
    }

    /// True iff a token is stored and its expiry lies in the future.
    pub fn is_authenticated(&self) -> bool {
        self.store
            .get(TOKEN_KEY)
            .map(|token| !is_token_expired(&token))
            .unwrap_or(false)
    }

    pub fn current_user(&self) -> Option<String> {
        self.store.get(USER_KEY)
    }

    pub fn current_role(&self) -> Option<String> {
        self.store.get(ROLE_KEY)
    }

    fn store_token(&self, token: &str) {
        self.store.set(TOKEN_KEY, token);
        // The token is kept even if the payload is undecodable — the
        // backend accepted it; user/role display just stays empty.
        if let Ok(claims) = decode_token(token) {
            self.store.set(USER_KEY, &claims.sub);
            self.store.set(ROLE_KEY, &claims.role);
        }
    }

    fn clear(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
        self.store.remove(ROLE_KEY);
    }
}

/// Decode the payload segment of a JWT. No signature verification.
pub fn decode_token(token: &str) -> Result<TokenClaims, CoreError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(CoreError::InvalidToken(
            "token does not have three segments".to_string(),
        ));
    }
    // Tolerate padded tokens; JWT base64url is canonically unpadded.
    let payload = parts[1].trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| CoreError::InvalidToken(format!("payload is not base64url: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| CoreError::InvalidToken(format!("payload is not valid claims JSON: {e}")))
}

/// True when the token cannot be decoded or its `exp` lies in the past.
pub fn is_token_expired(token: &str) -> bool {
    match decode_token(token) {
        Ok(claims) => claims.exp <= chrono::Utc::now().timestamp(),
        Err(_) => true,
    }
}
