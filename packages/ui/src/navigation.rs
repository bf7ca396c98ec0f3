/// Leaves the app for `/login` after the server rejected the credential.
///
/// On the web this is a full page load, so every component starts over from
/// the cleared session. Native shells have no location to change; their
/// guards send the user to login on the next navigation.
pub fn redirect_to_login() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(session::AppRoute::Login.path()) {
                tracing::error!("Failed to redirect to login: {:?}", e);
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::debug!("Credential rejected, login required on next navigation");
}
