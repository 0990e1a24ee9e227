//! Appointment routes
//!
//! Reads need any authenticated caller; every mutation needs the admin role.

use crate::auth::{AdminUser, Identity};
use crate::error::ApiResult;
use crate::services::AppointmentService;
use crate::state::AppState;
use appointment_booking_shared::{Appointment, MessageResponse};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

/// Create appointment routes
pub fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_appointments).post(create_appointment))
        .route(
            "/:id",
            get(get_appointment)
                .patch(update_appointment)
                .delete(delete_appointment),
        )
}

/// GET /appointments
async fn list_appointments(
    State(state): State<AppState>,
    _identity: Identity,
) -> Json<Vec<Appointment>> {
    Json(AppointmentService::list(state.appointments()))
}

/// GET /appointments/:id
async fn get_appointment(
    State(state): State<AppState>,
    _identity: Identity,
    Path(id): Path<i64>,
) -> ApiResult<Json<Appointment>> {
    Ok(Json(AppointmentService::get(state.appointments(), id)?))
}

/// POST /appointments
///
/// Echoes the stored appointment. 409 if the id is already taken.
async fn create_appointment(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(appointment): Json<Appointment>,
) -> ApiResult<Json<Appointment>> {
    let created = AppointmentService::create(state.appointments(), &admin, appointment)?;
    Ok(Json(created))
}

/// PATCH /appointments/:id
///
/// The body is a full appointment; its `id` is ignored in favour of the path.
async fn update_appointment(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
    Json(appointment): Json<Appointment>,
) -> ApiResult<Json<Appointment>> {
    let updated =
        AppointmentService::update(state.appointments(), &admin, id, appointment.into())?;
    Ok(Json(updated))
}

/// DELETE /appointments/:id
///
/// Succeeds whether or not anything matched.
async fn delete_appointment(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
) -> Json<MessageResponse> {
    AppointmentService::delete(state.appointments(), &admin, id);
    Json(MessageResponse::new("Appointment deleted"))
}
