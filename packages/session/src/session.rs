//! # Session store
//!
//! [`Session`] owns the bearer credential and the authenticated [`Identity`].
//! Both live in memory behind one lock and are mirrored to durable storage
//! under [`TOKEN_KEY`] and [`USER_KEY`].
//!
//! A `Session` is created once at startup with [`Session::restore`] and shared
//! by clone. It is the only writer of the two storage keys.
//!
//! Storage writes that fail are logged and ignored: the in-memory state stays
//! authoritative for the rest of the process.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use api::{ApiClient, ApiError, Identity, LoginGrant, RegisterRequest, Role};
use store::KeyValueStore;
use tracing::{debug, info, warn};

use crate::claims::identity_from_token;

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "ma_token";
/// Storage key of the JSON-encoded identity.
pub const USER_KEY: &str = "ma_user";
/// Display label when nobody is signed in.
pub const PLACEHOLDER_NAME: &str = "User";

/// Point-in-time copy of the session state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub token: Option<String>,
    pub user: Option<Identity>,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn role(&self) -> Option<&Role> {
        self.user.as_ref().map(|u| &u.role)
    }

    pub fn is_doctor(&self) -> bool {
        self.role() == Some(&Role::Doctor)
    }

    pub fn is_patient(&self) -> bool {
        self.role() == Some(&Role::Patient)
    }

    pub fn display_name(&self) -> &str {
        self.user
            .as_ref()
            .map(Identity::display_name)
            .unwrap_or(PLACEHOLDER_NAME)
    }
}

pub(crate) struct SessionInner {
    api: ApiClient,
    storage: Arc<dyn KeyValueStore>,
    state: RwLock<SessionSnapshot>,
}

/// Shared handle to the current session.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("Session")
            .field("authenticated", &state.is_authenticated())
            .field("user", &state.user)
            .finish()
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Session {
    /// Builds the session from whatever was persisted by a previous run.
    ///
    /// A stored identity that no longer parses is dropped without error.
    pub fn restore(api: ApiClient, storage: Arc<dyn KeyValueStore>) -> Self {
        let token = storage.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let user = storage.get(USER_KEY).and_then(|raw| {
            serde_json::from_str::<Identity>(&raw)
                .inspect_err(|e| debug!(error = %e, "Ignoring unreadable stored user"))
                .ok()
        });

        debug!(
            authenticated = token.is_some(),
            has_user = user.is_some(),
            "Session restored"
        );

        Self {
            inner: Arc::new(SessionInner {
                api,
                storage,
                state: RwLock::new(SessionSnapshot { token, user }),
            }),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub(crate) fn downgrade(&self) -> Weak<SessionInner> {
        Arc::downgrade(&self.inner)
    }

    pub(crate) fn from_inner(inner: Arc<SessionInner>) -> Self {
        Self { inner }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionSnapshot> {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionSnapshot> {
        self.inner.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Signs in and returns the resolved identity.
    ///
    /// The identity comes from the response's user record when present,
    /// otherwise from the token claims. An unreadable token yields `Ok(None)`
    /// with the token still stored. A response without a token is
    /// [`ApiError::InvalidAuthResponse`] and leaves the session untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<Identity>, ApiError> {
        let grant = api::auth::login(&self.inner.api, email, password).await?;
        Ok(self.apply_grant(grant))
    }

    /// Creates an account. The backend signs the new user in, so the
    /// response is applied exactly like a login.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Option<Identity>, ApiError> {
        let grant = api::auth::register(&self.inner.api, request).await?;
        Ok(self.apply_grant(grant))
    }

    /// Whether an account with this email is already registered.
    pub async fn email_exists(&self, email: &str) -> Result<bool, ApiError> {
        api::auth::check_email(&self.inner.api, email).await
    }

    fn apply_grant(&self, grant: LoginGrant) -> Option<Identity> {
        let LoginGrant { token, identity } = grant;
        let identity = identity.or_else(|| identity_from_token(&token));

        if identity.is_none() {
            warn!("Signed in but the user could not be resolved from the response or token");
        }

        // Token and user are replaced together; a racing login that completes
        // later overwrites both.
        let mut state = self.write();
        self.persist_token(&token);
        self.persist_user(identity.as_ref());
        state.token = Some(token);
        state.user = identity.clone();
        drop(state);

        info!(
            user_id = identity.as_ref().map(|u| u.id.as_str()),
            role = identity.as_ref().map(|u| u.role.as_str()),
            "Logged in"
        );
        identity
    }

    /// Forgets the credential and identity, in memory and in storage.
    /// Calling it again is harmless.
    pub fn logout(&self) {
        let mut state = self.write();
        let was_authenticated = state.token.is_some();
        *state = SessionSnapshot::default();
        self.persist_token("");
        self.persist_user(None);
        drop(state);

        if was_authenticated {
            info!("Logged out");
        }
    }

    /// The current token, falling back to storage when memory has none.
    pub fn get_token(&self) -> Option<String> {
        if let Some(token) = self.read().token.clone() {
            return Some(token);
        }
        self.inner.storage.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Replaces the token. An empty string clears it.
    pub fn set_token(&self, token: &str) {
        let mut state = self.write();
        self.persist_token(token);
        state.token = Some(token.to_string()).filter(|t| !t.is_empty());
    }

    /// Replaces the identity. `None` clears it.
    pub fn set_user(&self, user: Option<Identity>) {
        let mut state = self.write();
        self.persist_user(user.as_ref());
        state.user = user;
    }

    pub fn user(&self) -> Option<Identity> {
        self.read().user.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    pub fn is_doctor(&self) -> bool {
        self.read().is_doctor()
    }

    pub fn is_patient(&self) -> bool {
        self.read().is_patient()
    }

    /// Name, else id, else [`PLACEHOLDER_NAME`].
    pub fn display_name(&self) -> String {
        self.read().display_name().to_string()
    }

    fn persist_token(&self, token: &str) {
        let result = if token.is_empty() {
            self.inner.storage.remove(TOKEN_KEY)
        } else {
            self.inner.storage.set(TOKEN_KEY, token)
        };
        if let Err(e) = result {
            warn!(error = %e, key = TOKEN_KEY, "Failed to persist session token");
        }
    }

    fn persist_user(&self, user: Option<&Identity>) {
        let result = match user.map(serde_json::to_string) {
            Some(Ok(json)) => self.inner.storage.set(USER_KEY, &json),
            Some(Err(e)) => {
                warn!(error = %e, "Failed to encode user");
                return;
            }
            None => self.inner.storage.remove(USER_KEY),
        };
        if let Err(e) = result {
            warn!(error = %e, key = USER_KEY, "Failed to persist session user");
        }
    }
}
