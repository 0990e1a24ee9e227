//! Appointment Booking Shared Library
//!
//! Domain models, wire types and error enums shared by the backend and its tests.

pub mod errors;
pub mod models;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use models::*;
pub use types::*;
