//! # Session crate — authentication lifecycle for the medical appointments client
//!
//! Owns everything about "who is signed in" and the rules that follow from it.
//! It has no UI dependency, so every rule is testable on its own.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`session`] | [`Session`]: token and identity, persisted under `ma_token` / `ma_user` |
//! | [`claims`] | Identity recovery from a JWT payload |
//! | [`bridge`] | [`install_auth_bridge`]: hooks the session into the [`api::ApiClient`] |
//! | [`guard`] | Route table and per-navigation access decisions |
//! | [`slot_form`] | Local slot bounds to canonical UTC |
//! | [`theme`] | Light/dark/system preference |
//! | [`formatters`] | Email and phone helpers for the registration form |
//! | [`logging`] | `tracing-subscriber` setup |
//!
//! ## Startup order
//!
//! ```no_run
//! use std::sync::Arc;
//! use session::{install_auth_bridge, Session};
//!
//! # fn main() -> Result<(), api::ApiError> {
//! session::logging::init();
//! let api = api::ApiClient::new(&api::ClientConfig::from_env())?;
//! let session = Session::restore(api, Arc::new(store::MemoryStore::new()));
//! install_auth_bridge(&session, || tracing::info!("redirecting to /login"))?;
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod claims;
pub mod formatters;
pub mod guard;
pub mod logging;
pub mod session;
pub mod slot_form;
pub mod theme;

pub use bridge::install_auth_bridge;
pub use guard::{
    evaluate, evaluate_path, evaluate_route, landing_for, AppRoute, GuardDecision,
    RouteRequirement,
};
pub use session::{Session, SessionSnapshot, PLACEHOLDER_NAME, TOKEN_KEY, USER_KEY};
pub use slot_form::{SlotDraft, SlotFormError};
pub use theme::{ThemePreference, ThemeStore, THEME_KEY};
