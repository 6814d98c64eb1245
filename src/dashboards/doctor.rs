//! Doctor dashboard.
//!
//! Lists the doctor's own appointments and lab requests, confirms pending
//! appointments, and runs consultation sessions. Resolving a consultation
//! is one composite operation: the queued medications become a prescription
//! and the appointment advances to completed — completion is never a
//! standalone button. Ordering a lab test deliberately does NOT complete
//! the appointment: the doctor reviews results before finalizing.

use crate::api::WorkflowApi;
use crate::models::{
    Account, Appointment, AppointmentStatus, LabReport, LabRequest, NewLabRequest, Role, TestType,
};
use crate::workflow;

use super::consult::Consultation;
use super::{require_role, DashboardError};

#[derive(Debug)]
pub struct DoctorDashboard<A> {
    api: A,
    identity: Account,
    appointments: Vec<Appointment>,
    lab_requests: Vec<LabRequest>,
}

impl<A: WorkflowApi> DoctorDashboard<A> {
    pub fn new(api: A, identity: Account) -> Result<Self, DashboardError> {
        require_role(Role::Doctor, identity.role)?;
        Ok(Self {
            api,
            identity,
            appointments: Vec::new(),
            lab_requests: Vec::new(),
        })
    }

    /// Refetch both lists from the backend.
    pub async fn refresh(&mut self) -> Result<(), DashboardError> {
        self.appointments = self.api.list_appointments().await?;
        self.lab_requests = self.api.list_lab_requests().await?;
        Ok(())
    }

    // ── Read views ──────────────────────────────────────────

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn lab_requests(&self) -> &[LabRequest] {
        &self.lab_requests
    }

    /// Whether the confirm control is rendered for this appointment.
    pub fn can_confirm(&self, appointment: &Appointment) -> bool {
        workflow::can_confirm(&self.identity, appointment)
    }

    // ── Transitions ─────────────────────────────────────────

    /// Advance a pending appointment to confirmed.
    pub async fn confirm(&mut self, appointment_id: &str) -> Result<(), DashboardError> {
        let appointment = self.find_appointment(appointment_id)?;
        if !workflow::can_confirm(&self.identity, appointment) {
            return Err(DashboardError::NotPermitted(
                "Only the assigned doctor may confirm a pending appointment".into(),
            ));
        }
        self.api
            .update_appointment_status(appointment_id, AppointmentStatus::Confirmed)
            .await?;
        tracing::info!(appointment_id, "Appointment confirmed");
        self.refresh().await
    }

    /// Open a consultation draft for one of this doctor's appointments.
    pub fn begin_consultation(
        &self,
        appointment_id: &str,
    ) -> Result<Consultation, DashboardError> {
        let appointment = self.find_appointment(appointment_id)?;
        if !workflow::can_resolve_consultation(&self.identity, appointment) {
            return Err(DashboardError::NotPermitted(
                "This appointment is already completed".into(),
            ));
        }
        Ok(Consultation::for_appointment(appointment))
    }

    /// Submit the draft as one prescription and complete the appointment.
    ///
    /// Atomic from the client's perspective: if the prescription call
    /// fails, the status call is never issued and the appointment is left
    /// untouched for a retry.
    pub async fn resolve_consultation(
        &mut self,
        draft: Consultation,
    ) -> Result<(), DashboardError> {
        let appointment_id = draft.appointment_id().to_string();
        {
            let appointment = self.find_appointment(&appointment_id)?;
            if !workflow::can_resolve_consultation(&self.identity, appointment) {
                return Err(DashboardError::NotPermitted(
                    "This appointment is already completed".into(),
                ));
            }
            if !workflow::status_advances(appointment.status, AppointmentStatus::Completed) {
                return Err(DashboardError::NotPermitted(
                    "Appointment status cannot move backward".into(),
                ));
            }
        }
        let prescription = draft.into_prescription()?;
        self.api.create_prescription(&prescription).await?;
        self.api
            .update_appointment_status(&appointment_id, AppointmentStatus::Completed)
            .await?;
        tracing::info!(appointment_id, "Consultation resolved, sent to pharmacy");
        self.refresh().await
    }

    /// Order a lab test for an appointment. The appointment stays open —
    /// the doctor consults again once results arrive.
    pub async fn order_lab_test(
        &mut self,
        appointment_id: &str,
        test_type: TestType,
        notes: Option<String>,
    ) -> Result<(), DashboardError> {
        let appointment = self.find_appointment(appointment_id)?;
        if !workflow::can_order_lab(&self.identity, appointment) {
            return Err(DashboardError::NotPermitted(
                "Lab tests can only be ordered on open appointments".into(),
            ));
        }
        let input = NewLabRequest {
            appointment_id: appointment.id.clone(),
            patient_id: appointment.patient_id.clone(),
            test_type,
            notes,
        };
        self.api.create_lab_request(&input).await?;
        tracing::info!(appointment_id, test = test_type.as_str(), "Lab test ordered");
        self.refresh().await
    }

    /// Fetch the AI report for one of this doctor's completed requests.
    pub async fn view_report(&self, result_id: &str) -> Result<LabReport, DashboardError> {
        let permitted = self
            .lab_requests
            .iter()
            .any(|r| r.result_id.as_deref() == Some(result_id)
                && workflow::can_view_report(&self.identity, r));
        if !permitted {
            return Err(DashboardError::NotPermitted(
                "No completed lab request with this result".into(),
            ));
        }
        Ok(self.api.get_lab_report(result_id).await?)
    }

    fn find_appointment(&self, id: &str) -> Result<&Appointment, DashboardError> {
        self.appointments
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| DashboardError::UnknownEntity {
                kind: "appointment",
                id: id.to_string(),
            })
    }
}
