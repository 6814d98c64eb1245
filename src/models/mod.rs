//! Workflow entity models.
//!
//! Mirrors of the backend-owned records: the client never mutates these
//! locally, it refetches after every transition call. Closed enums live in
//! [`enums`]; role/status strings off the wire must parse into them or the
//! record is rejected at the API boundary.

pub mod account;
pub mod appointment;
pub mod enums;
pub mod medical;
pub mod stats;

pub use account::{Account, NewAccount, TokenResponse};
pub use appointment::{Appointment, NewAppointment};
pub use enums::{AppointmentStatus, LabRequestStatus, Role, TestType};
pub use medical::{
    LabReport, LabRequest, MedicationItem, NewLabRequest, NewPrescription, Prescription,
};
pub use stats::{ChartSlice, PublicStats, StatsOverview, SystemCharts, SystemStats};

/// Errors from model parsing.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid value '{value}' for {field}")]
    InvalidEnum { field: String, value: String },
}
