//! Dioxus bindings shared by every frontend.
//!
//! Wrap the app in [`AuthProvider`] with a context built by
//! [`AppContext::for_platform`], then guard role-specific pages with
//! [`RouteGuard`].

mod context;
pub use context::{platform_storage, AppContext, DATA_DIR_NAME};

mod auth;
pub use auth::{sign_in, use_app, use_auth, AuthProvider, AuthState, LogoutButton};

mod guard;
pub use guard::RouteGuard;

mod theme;
pub use theme::{
    apply_theme, system_prefers_dark, use_theme, watch_system_theme, ThemeSignal, ThemeToggle,
};

mod navigation;
pub use navigation::redirect_to_login;

pub use session::{AppRoute, GuardDecision};
