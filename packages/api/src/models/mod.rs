//! Wire models exchanged with the REST API.

mod appointment;
mod auth;
mod doctor;
mod identity;
mod slot;

pub use appointment::{Appointment, CreateAppointment};
pub use auth::{AuthResponse, EmailCheck, LoginGrant, LoginRequest, RegisterRequest};
pub use doctor::Doctor;
pub use identity::{Identity, Role};
pub use slot::{Slot, SlotRequest};
