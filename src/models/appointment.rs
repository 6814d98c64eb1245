use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::AppointmentStatus;

/// An appointment as the backend returns it.
///
/// `patient_id` and `status` are stamped by the backend at creation;
/// status only ever advances (pending → confirmed → completed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub date_time: DateTime<Utc>,
    pub symptoms: String,
    pub status: AppointmentStatus,
    pub created_at: Option<DateTime<Utc>>,
}

/// Booking input (patient only). The backend fills patient_id and status.
#[derive(Debug, Clone, Serialize)]
pub struct NewAppointment {
    pub doctor_id: String,
    pub date_time: DateTime<Utc>,
    pub symptoms: String,
}

impl NewAppointment {
    /// Booking-form validation: a chosen doctor, non-empty symptoms, and a
    /// timestamp that is still in the future.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), BookingError> {
        if self.doctor_id.trim().is_empty() {
            return Err(BookingError::MissingDoctor);
        }
        if self.symptoms.trim().is_empty() {
            return Err(BookingError::MissingSymptoms);
        }
        if self.date_time <= now {
            return Err(BookingError::PastDateTime);
        }
        Ok(())
    }
}

/// Rejections from booking-form validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("No doctor selected")]
    MissingDoctor,
    #[error("Symptoms description is required")]
    MissingSymptoms,
    #[error("Appointment time must be in the future")]
    PastDateTime,
}
