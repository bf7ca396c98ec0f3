use dioxus::prelude::*;
use session::{evaluate_path, GuardDecision};

use crate::auth::{use_app, use_auth};

/// Renders `children` only when the session may enter `path`; otherwise
/// replaces the current history entry with the redirect target.
///
/// `path` is the rendered router path, e.g. `Route::DoctorSlots {}.to_string()`.
#[component]
pub fn RouteGuard(path: String, children: Element) -> Element {
    let app = use_app();
    let auth = use_auth();
    let nav = use_navigator();

    // Subscribe to auth changes, but decide on the live session
    let _ = auth.read();
    match evaluate_path(&path, &app.session.snapshot()) {
        GuardDecision::Allow => rsx! {
            {children}
        },
        GuardDecision::Redirect(to) => {
            nav.replace(NavigationTarget::Internal(to.path().to_string()));
            rsx! {}
        }
    }
}
