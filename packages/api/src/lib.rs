//! # API crate — REST access for the medical appointments client
//!
//! Everything that talks to the backend lives here: the single shared
//! [`ApiClient`], the wire models, and one thin wrapper per remote operation.
//! The session layer (crate `session`) builds on top of this crate and plugs
//! its credential into the client through [`ApiClient::register_auth_handlers`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | Configured `reqwest` transport, bearer header injection, 401 notification |
//! | [`config`] | [`ClientConfig`]: base address (with `API_BASE_URL` override) and timeout |
//! | [`error`] | [`ApiError`] taxonomy shared by every call |
//! | [`models`] | Identity, doctors, slots, appointments and auth payloads |
//! | [`auth`] | `login`, `register`, `check_email` |
//! | [`doctors`] | `list_doctors` |
//! | [`slots`] | Doctor slot CRUD |
//! | [`appointments`] | Booking and listing appointments |
//!
//! Every wrapper goes through [`ApiClient`], so all of them inherit the
//! authorization header and the unauthorized callback once they are registered.

pub mod appointments;
pub mod auth;
pub mod client;
pub mod config;
pub mod doctors;
pub mod error;
pub mod models;
pub mod slots;

#[cfg(any(test, feature = "test-util"))]
pub mod test_util;

pub use client::{ApiClient, AuthHookError};
pub use config::ClientConfig;
pub use error::ApiError;
pub use models::{
    Appointment, AuthResponse, CreateAppointment, Doctor, Identity, LoginGrant, RegisterRequest,
    Role, Slot, SlotRequest,
};
pub use reqwest::StatusCode;
