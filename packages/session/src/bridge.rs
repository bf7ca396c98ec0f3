//! Wires a [`Session`] into its [`ApiClient`](api::ApiClient).
//!
//! The client asks the session for the bearer token before each request, and
//! a `401` logs the session out before handing control to the caller's
//! `on_unauthorized` action (typically a redirect to the login page).

use std::sync::Weak;

use api::{ApiError, AuthHookError};
use tracing::info;

use crate::session::{Session, SessionInner};

fn upgrade(weak: &Weak<SessionInner>) -> Result<Session, AuthHookError> {
    weak.upgrade()
        .map(Session::from_inner)
        .ok_or_else(|| "session has been dropped".into())
}

/// Registers the session's token and logout with the session's client.
///
/// The client only holds a weak reference to the session. Call once per
/// client; a second call returns [`ApiError::AuthAlreadyRegistered`] and
/// leaves the first registration in place.
pub fn install_auth_bridge<F>(session: &Session, on_unauthorized: F) -> Result<(), ApiError>
where
    F: Fn() + Send + Sync + 'static,
{
    let for_token = session.downgrade();
    let for_logout = session.downgrade();

    session.api().register_auth_handlers(
        move || Ok(upgrade(&for_token)?.get_token().unwrap_or_default()),
        move || {
            let session = upgrade(&for_logout)?;
            info!("Server rejected the credential, ending session");
            session.logout();
            on_unauthorized();
            Ok(())
        },
    )
}
