//! Data models for the appointment booking application

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role attached to a credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booked appointment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_name: String,
    pub doctor_name: String,
    pub date: NaiveDateTime,
    pub status: String,
}

/// Fields replaced by a PATCH; the id of the stored record never changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentUpdate {
    pub patient_name: String,
    pub doctor_name: String,
    pub date: NaiveDateTime,
    pub status: String,
}

impl From<Appointment> for AppointmentUpdate {
    fn from(appointment: Appointment) -> Self {
        Self {
            patient_name: appointment.patient_name,
            doctor_name: appointment.doctor_name,
            date: appointment.date,
            status: appointment.status,
        }
    }
}

impl Appointment {
    /// Overwrite the mutable fields, keeping `id`
    pub fn apply(&mut self, update: AppointmentUpdate) {
        self.patient_name = update.patient_name;
        self.doctor_name = update.doctor_name;
        self.date = update.date;
        self.status = update.status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn sample() -> Appointment {
        Appointment {
            id: 1,
            patient_name: "A".to_string(),
            doctor_name: "B".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            status: "scheduled".to_string(),
        }
    }

    #[rstest]
    #[case(Role::Admin, "admin")]
    #[case(Role::User, "user")]
    fn test_role_serializes_lowercase(#[case] role: Role, #[case] expected: &str) {
        assert_eq!(serde_json::to_string(&role).unwrap(), format!("\"{}\"", expected));
        assert_eq!(role.to_string(), expected);
    }

    #[test]
    fn test_appointment_date_wire_format() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["date"], "2024-01-01T00:00:00");

        let parsed: Appointment = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut appointment = sample();
        let mut replacement = sample();
        replacement.id = 42;
        replacement.status = "cancelled".to_string();

        appointment.apply(replacement.into());

        assert_eq!(appointment.id, 1);
        assert_eq!(appointment.status, "cancelled");
    }
}
