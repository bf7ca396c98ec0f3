//! Authentication context and hooks for the UI.

use std::time::Duration;

use api::{ApiError, Identity};
use dioxus::prelude::*;
use session::{landing_for, AppRoute, SessionSnapshot};

use crate::context::AppContext;
use crate::theme::{apply_theme, system_prefers_dark, watch_system_theme, ThemeSignal};

/// Authentication state for the application.
pub type AuthState = SessionSnapshot;

/// How often the signal is reconciled with the session. Catches logouts
/// triggered by the auth bridge outside any component.
const SESSION_SYNC_INTERVAL: Duration = Duration::from_secs(5);

/// The shared application services.
pub fn use_app() -> AppContext {
    use_context::<AppContext>()
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

fn sync(app: &AppContext, mut auth: Signal<AuthState>) {
    let current = app.session.snapshot();
    if *auth.peek() != current {
        auth.set(current);
    }
}

/// Signs in and publishes the new state. Returns the page the user should
/// land on.
pub async fn sign_in(
    app: AppContext,
    auth: Signal<AuthState>,
    email: String,
    password: String,
) -> Result<(Option<Identity>, AppRoute), ApiError> {
    let result = app.session.login(email.trim(), &password).await;
    sync(&app, auth);
    let identity = result?;
    Ok((identity, landing_for(&app.session.snapshot())))
}

/// Provider component that exposes the application context, the auth state
/// and the theme preference. Wrap your app with this component.
#[component]
pub fn AuthProvider(context: AppContext, children: Element) -> Element {
    let app = use_context_provider(|| context.clone());
    let auth_state = use_signal(|| app.session.snapshot());
    let theme: ThemeSignal = use_signal(|| app.theme.preference());

    let sync_app = app.clone();
    use_effect(move || {
        let app = sync_app.clone();
        spawn(async move {
            loop {
                #[cfg(target_arch = "wasm32")]
                gloo_timers::future::sleep(SESSION_SYNC_INTERVAL).await;
                #[cfg(not(target_arch = "wasm32"))]
                tokio::time::sleep(SESSION_SYNC_INTERVAL).await;

                sync(&app, auth_state);
            }
        });
    });

    let theme_store = app.theme.clone();
    use_effect(move || {
        // Re-run whenever the preference signal changes
        let _ = theme();
        apply_theme(theme_store.is_dark(system_prefers_dark()));
    });

    let watched_store = app.theme.clone();
    use_hook(move || watch_system_theme(watched_store));

    use_context_provider(|| auth_state);
    use_context_provider(|| theme);

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let app = use_app();
    let auth_state = use_auth();
    let nav = use_navigator();

    let onclick = move |_| {
        app.session.logout();
        sync(&app, auth_state);
        nav.replace(NavigationTarget::Internal(AppRoute::Login.path().to_string()));
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
