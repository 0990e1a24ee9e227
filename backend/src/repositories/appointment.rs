//! In-memory appointment repository
//!
//! Records are kept in insertion order behind a single lock, so each call is
//! atomic with respect to concurrent requests. Ids are unique: inserting an
//! id that is already stored fails instead of creating an ambiguous twin.

use appointment_booking_shared::{Appointment, AppointmentUpdate, RepositoryError};
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared handle to the appointment list; clones see the same records
#[derive(Clone, Default)]
pub struct AppointmentRepository {
    records: Arc<RwLock<Vec<Appointment>>>,
}

impl AppointmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All appointments in insertion order
    pub fn list(&self) -> Vec<Appointment> {
        self.records.read().clone()
    }

    pub fn insert(&self, appointment: Appointment) -> Result<Appointment, RepositoryError> {
        let mut records = self.records.write();
        if records.iter().any(|a| a.id == appointment.id) {
            return Err(RepositoryError::DuplicateId(appointment.id));
        }
        records.push(appointment.clone());
        Ok(appointment)
    }

    /// Remove every appointment with `id`, returning how many went
    pub fn delete_by_id(&self, id: i64) -> usize {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|a| a.id != id);
        before - records.len()
    }

    pub fn find_by_id(&self, id: i64) -> Option<Appointment> {
        self.records.read().iter().find(|a| a.id == id).cloned()
    }

    /// Overwrite the mutable fields of the appointment with `id`
    pub fn replace_fields(
        &self,
        id: i64,
        update: AppointmentUpdate,
    ) -> Result<Appointment, RepositoryError> {
        let mut records = self.records.write();
        let existing = records
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(RepositoryError::NotFound(id))?;
        existing.apply(update);
        Ok(existing.clone())
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}
