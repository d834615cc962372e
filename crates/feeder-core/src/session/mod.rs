//! Session state: the client's record of who is logged in.
//!
//! Credentials are persisted through an injected [`CredentialStore`] and the
//! current token is shared with the gateway via [`AuthToken`], so every
//! request picks up the header without the session and gateway owning each
//! other.

mod persist;

use std::sync::{Arc, RwLock};

use base64::Engine;

use crate::api::ApiGateway;
use crate::{Error, Result};

pub use persist::{CredentialStore, FileStore, MemoryStore};

pub const AUTH_KEY: &str = "auth";
pub const USERNAME_KEY: &str = "username";

/// Non-standard scheme name used by the feedreader backend
const AUTH_SCHEME: &str = "xBasic";

/// Shared handle to the current authorization token.
///
/// Cloned into the gateway; reading the header is synchronous.
#[derive(Debug, Clone, Default)]
pub struct AuthToken(Arc<RwLock<Option<String>>>);

impl AuthToken {
    /// The `Authorization` header value, if a token is present
    pub fn header(&self) -> Option<String> {
        self.0
            .read()
            .expect("auth token lock poisoned")
            .as_ref()
            .map(|token| format!("{} {}", AUTH_SCHEME, token))
    }

    pub fn is_set(&self) -> bool {
        self.0.read().expect("auth token lock poisoned").is_some()
    }

    fn set(&self, token: Option<String>) {
        *self.0.write().expect("auth token lock poisoned") = token;
    }
}

pub struct Session {
    username: Option<String>,
    token: AuthToken,
    store: Box<dyn CredentialStore>,
}

impl Session {
    /// Restore session state from the credential store
    pub fn load(store: Box<dyn CredentialStore>) -> Self {
        let token = AuthToken::default();
        token.set(store.get(AUTH_KEY));

        Self {
            username: store.get(USERNAME_KEY),
            token,
            store,
        }
    }

    /// Handle for the gateway to attach to outgoing requests
    pub fn token(&self) -> AuthToken {
        self.token.clone()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_set()
    }

    /// The current `Authorization` header value, computed synchronously
    pub fn auth_header(&self) -> Option<String> {
        self.token.header()
    }

    /// Log in by probing the user endpoint with the candidate credentials.
    ///
    /// On failure the session state is left untouched.
    pub async fn login(&mut self, gateway: &ApiGateway, username: &str, password: &str) -> Result<()> {
        let token = encode_credentials(username, password);
        let header = format!("{} {}", AUTH_SCHEME, token);

        let user = gateway.login_probe(&header).await?;
        tracing::debug!(username = %user.username, "login probe succeeded");

        self.commit(username, token);
        Ok(())
    }

    /// Create an account and log in with the new credentials.
    ///
    /// The backend rejects duplicate usernames with a 400, which surfaces
    /// here as an authentication failure.
    pub async fn register(
        &mut self,
        gateway: &ApiGateway,
        username: &str,
        password: &str,
    ) -> Result<()> {
        gateway
            .create_user(username, password)
            .await
            .map_err(|err| match err {
                Error::Api { status: 400, message } => Error::Auth(message),
                other => other,
            })?;

        self.commit(username, encode_credentials(username, password));
        Ok(())
    }

    /// Clear in-memory state and remove the stored credential
    pub fn logout(&mut self) {
        self.username = None;
        self.token.set(None);
        self.store.remove(AUTH_KEY);
        self.store.remove(USERNAME_KEY);
    }

    fn commit(&mut self, username: &str, token: String) {
        self.store.set(AUTH_KEY, &token);
        self.store.set(USERNAME_KEY, username);
        self.username = Some(username.to_string());
        self.token.set(Some(token));
    }
}

fn encode_credentials(username: &str, password: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(format!("{}:{}", username, password))
}
