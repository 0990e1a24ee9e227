//! Business logic services
//!
//! Services sit between the route handlers and the access guard or
//! repositories, and own the audit logging of mutations.

pub mod appointment;
pub mod auth;

pub use appointment::AppointmentService;
pub use auth::AuthService;
