//! Session store.
//!
//! The single authenticated identity for this client, derived from the
//! durable bearer token. Explicitly owned and injected — created once at
//! app start, passed to the router and dashboards, reset on logout — rather
//! than ambient module state.
//!
//! Lifecycle: `ready` is false until the initial [`Session::refresh`]
//! resolves (success or failure). Consumers must not render role-gated
//! content while `ready` is false, to avoid a flash of unauthenticated or
//! wrong-role UI.

use chrono::Utc;

use crate::api::{ApiError, AuthApi};
use crate::models::{Account, NewAccount, Role};
use crate::token_store::{decode_claims, TokenStore, TokenStoreError};

/// Errors from session operations.
///
/// Auth failures never surface here — an invalid or expired token resolves
/// to the logged-out state, not an error.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),
}

/// The authenticated session context.
pub struct Session<A> {
    api: A,
    tokens: TokenStore,
    identity: Option<Account>,
    ready: bool,
}

impl<A: AuthApi> Session<A> {
    /// New session; call [`Session::refresh`] once at app start.
    pub fn new(api: A, tokens: TokenStore) -> Self {
        Self {
            api,
            tokens,
            identity: None,
            ready: false,
        }
    }

    // ── State ───────────────────────────────────────────────

    pub fn identity(&self) -> Option<&Account> {
        self.identity.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|a| a.role)
    }

    /// True once the initial refresh attempt has resolved either way.
    pub fn ready(&self) -> bool {
        self.ready
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    // ── Transitions ─────────────────────────────────────────

    /// Exchange credentials for a bearer token, persist it, and refresh.
    pub async fn login(&mut self, identifier: &str, secret: &str) -> Result<(), SessionError> {
        let token = self.api.login(identifier, secret).await?;
        self.tokens.save(&token.access_token)?;
        tracing::info!("Login succeeded, refreshing identity");
        self.refresh().await
    }

    /// Fetch the current identity for the stored token.
    ///
    /// A missing, malformed, or expired token resolves to the logged-out
    /// state without touching the network. A 401 from the backend clears
    /// the token the same way. Only transport-level failures return `Err` —
    /// and even then `ready` is true, never an indefinite loading state.
    pub async fn refresh(&mut self) -> Result<(), SessionError> {
        let result = self.refresh_inner().await;
        self.ready = true;
        result
    }

    async fn refresh_inner(&mut self) -> Result<(), SessionError> {
        let token = match self.tokens.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Token store unreadable, treating as logged out: {e}");
                self.identity = None;
                return Ok(());
            }
        };
        let Some(token) = token else {
            self.identity = None;
            return Ok(());
        };

        match decode_claims(&token) {
            Ok(claims) if claims.is_expired(Utc::now()) => {
                tracing::info!("Stored token expired, clearing");
                return self.drop_credentials();
            }
            Ok(_) => {}
            Err(_) => {
                tracing::warn!("Stored token malformed, clearing");
                return self.drop_credentials();
            }
        }

        match self.api.me().await {
            Ok(account) => {
                tracing::info!(role = account.role.as_str(), "Identity refreshed");
                self.identity = Some(account);
                Ok(())
            }
            Err(ApiError::Unauthorized(msg)) => {
                tracing::info!("Token rejected by backend ({msg}), clearing");
                self.drop_credentials()
            }
            Err(e) => {
                // Transport trouble: keep the token, surface the failure.
                self.identity = None;
                Err(e.into())
            }
        }
    }

    /// Clear token and identity. No network call.
    pub fn logout(&mut self) {
        if let Err(e) = self.tokens.clear() {
            tracing::warn!("Failed to remove token file on logout: {e}");
        }
        self.identity = None;
        tracing::info!("Logged out");
    }

    /// Create a new account. On success the caller still logs in
    /// explicitly — registration does not start a session.
    pub async fn register(&self, input: &NewAccount) -> Result<Account, SessionError> {
        Ok(self.api.register(input).await?)
    }

    fn drop_credentials(&mut self) -> Result<(), SessionError> {
        self.identity = None;
        self.tokens.clear()?;
        Ok(())
    }
}
