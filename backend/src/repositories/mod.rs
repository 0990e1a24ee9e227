//! Repositories
//!
//! Provides the data access layer. Storage is in-process only.

pub mod appointment;

pub use appointment::AppointmentRepository;
