//! Appointment service
//!
//! Callers must have passed the admin check before any mutating call here.

use crate::auth::Identity;
use crate::error::ApiError;
use crate::repositories::AppointmentRepository;
use appointment_booking_shared::{Appointment, AppointmentUpdate};
use tracing::{debug, info};

pub struct AppointmentService;

impl AppointmentService {
    pub fn list(repo: &AppointmentRepository) -> Vec<Appointment> {
        repo.list()
    }

    pub fn get(repo: &AppointmentRepository, id: i64) -> Result<Appointment, ApiError> {
        repo.find_by_id(id)
            .ok_or_else(|| ApiError::NotFound("Appointment not found".to_string()))
    }

    pub fn create(
        repo: &AppointmentRepository,
        actor: &Identity,
        appointment: Appointment,
    ) -> Result<Appointment, ApiError> {
        let created = repo.insert(appointment)?;
        info!(id = created.id, by = %actor.username, "Appointment created");
        Ok(created)
    }

    pub fn update(
        repo: &AppointmentRepository,
        actor: &Identity,
        id: i64,
        update: AppointmentUpdate,
    ) -> Result<Appointment, ApiError> {
        let updated = repo.replace_fields(id, update)?;
        info!(id, by = %actor.username, "Appointment updated");
        Ok(updated)
    }

    /// Delete is idempotent: a missing id is not an error
    pub fn delete(repo: &AppointmentRepository, actor: &Identity, id: i64) -> usize {
        let removed = repo.delete_by_id(id);
        if removed == 0 {
            debug!(id, by = %actor.username, "Delete matched no appointment");
        } else {
            info!(id, removed, by = %actor.username, "Appointment deleted");
        }
        removed
    }
}
