//! Workflow transition rules.
//!
//! Pure, client-side mirrors of the backend's state machines — the
//! dashboards consult these before offering any control, so a role never
//! sees an action it does not own. Defense in depth only: the backend
//! performs the authoritative check on every mutating call.
//!
//! Status machines:
//! - Appointment: pending → confirmed → completed (completed is terminal;
//!   prescribing may complete a pending appointment directly)
//! - LabRequest:  pending → completed (single-shot upload)
//! - Prescription: is_dispensed false → true (one-way)

use crate::models::{
    Account, Appointment, AppointmentStatus, LabRequest, LabRequestStatus, Prescription, Role,
};

// ─── Appointment status ordering ──────────────────────────────────────────────

fn rank(status: AppointmentStatus) -> u8 {
    match status {
        AppointmentStatus::Pending => 0,
        AppointmentStatus::Confirmed => 1,
        AppointmentStatus::Completed => 2,
    }
}

/// Whether a status change is a strict forward step. Equal or backward
/// moves are refused before any wire call is issued.
pub fn status_advances(from: AppointmentStatus, to: AppointmentStatus) -> bool {
    rank(to) > rank(from)
}

// ─── Actor gates ──────────────────────────────────────────────────────────────

/// Booking is patient-only; the backend stamps the patient id.
pub fn can_book(actor: &Account) -> bool {
    matches!(actor.role, Role::Patient)
}

/// Confirm: only the assigned doctor, only while pending.
pub fn can_confirm(actor: &Account, appointment: &Appointment) -> bool {
    owns_appointment(actor, appointment) && appointment.status == AppointmentStatus::Pending
}

/// Resolving a consultation (prescribe + complete) is open to the assigned
/// doctor until the appointment is completed.
pub fn can_resolve_consultation(actor: &Account, appointment: &Appointment) -> bool {
    owns_appointment(actor, appointment) && appointment.status != AppointmentStatus::Completed
}

/// Ordering a lab test does not complete the appointment, so it follows the
/// same gate as consultation itself.
pub fn can_order_lab(actor: &Account, appointment: &Appointment) -> bool {
    can_resolve_consultation(actor, appointment)
}

/// Upload: any lab technician, unassigned queue, pending requests only.
/// Uploads are single-shot and non-retractable.
pub fn can_upload_report(actor: &Account, request: &LabRequest) -> bool {
    matches!(actor.role, Role::LabTechnician) && request.status == LabRequestStatus::Pending
}

/// Dispense: any pharmacy account, unassigned queue, one-way flip.
pub fn can_dispense(actor: &Account, prescription: &Prescription) -> bool {
    matches!(actor.role, Role::Pharmacy) && !prescription.is_dispensed
}

/// A completed report is visible to the originating patient, the referring
/// doctor, and lab staff generally.
pub fn can_view_report(actor: &Account, request: &LabRequest) -> bool {
    match actor.role {
        Role::Patient => request.patient_id == actor.id,
        Role::Doctor => request.doctor_id == actor.id,
        Role::LabTechnician => true,
        Role::Pharmacy | Role::Admin => false,
    }
}

fn owns_appointment(actor: &Account, appointment: &Appointment) -> bool {
    matches!(actor.role, Role::Doctor) && appointment.doctor_id == actor.id
}
