//! Patient dashboard.
//!
//! Read views over the patient's own appointments, prescriptions and lab
//! requests, a doctor directory for booking, and the one transition a
//! patient owns: creating an appointment in `pending`.

use chrono::{DateTime, Utc};

use crate::api::WorkflowApi;
use crate::models::{
    Account, Appointment, LabReport, LabRequest, NewAppointment, Prescription, Role,
};
use crate::workflow;

use super::{require_role, DashboardError};

#[derive(Debug)]
pub struct PatientDashboard<A> {
    api: A,
    identity: Account,
    appointments: Vec<Appointment>,
    prescriptions: Vec<Prescription>,
    lab_requests: Vec<LabRequest>,
    doctors: Vec<Account>,
}

impl<A: WorkflowApi> PatientDashboard<A> {
    pub fn new(api: A, identity: Account) -> Result<Self, DashboardError> {
        require_role(Role::Patient, identity.role)?;
        Ok(Self {
            api,
            identity,
            appointments: Vec::new(),
            prescriptions: Vec::new(),
            lab_requests: Vec::new(),
            doctors: Vec::new(),
        })
    }

    /// Refetch everything the patient sees.
    pub async fn refresh(&mut self) -> Result<(), DashboardError> {
        self.appointments = self.api.list_appointments().await?;
        self.prescriptions = self.api.list_prescriptions().await?;
        self.lab_requests = self.api.list_lab_requests().await?;
        self.doctors = self.api.list_doctors().await?;
        Ok(())
    }

    // ── Read views ──────────────────────────────────────────

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn prescriptions(&self) -> &[Prescription] {
        &self.prescriptions
    }

    pub fn lab_requests(&self) -> &[LabRequest] {
        &self.lab_requests
    }

    /// Doctor directory for the booking form.
    pub fn doctors(&self) -> &[Account] {
        &self.doctors
    }

    // ── Transitions ─────────────────────────────────────────

    /// Book a new appointment. Validated client-side (chosen doctor,
    /// future timestamp, non-empty symptoms) before the wire call; the
    /// backend stamps patient id and `pending` status.
    pub async fn book_appointment(
        &mut self,
        doctor_id: &str,
        date_time: DateTime<Utc>,
        symptoms: &str,
    ) -> Result<(), DashboardError> {
        if !workflow::can_book(&self.identity) {
            return Err(DashboardError::NotPermitted(
                "Only patients book appointments".into(),
            ));
        }
        let input = NewAppointment {
            doctor_id: doctor_id.to_string(),
            date_time,
            symptoms: symptoms.to_string(),
        };
        input.validate(Utc::now())?;
        self.api.create_appointment(&input).await?;
        tracing::info!(doctor_id, "Appointment booked");
        self.refresh().await
    }

    /// Fetch the AI report behind one of this patient's completed requests.
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::stub::{account, StubBackend};
    use crate::models::AppointmentStatus;
    use chrono::Duration;

    async fn dash(backend: &StubBackend) -> PatientDashboard<&StubBackend> {
        backend.set_actor(account("p1", Role::Patient));
        let mut dash = PatientDashboard::new(backend, account("p1", Role::Patient)).unwrap();
        dash.refresh().await.unwrap();
        dash
    }

    #[test]
    fn wrong_role_cannot_build_the_dashboard() {
        let backend = StubBackend::new();
        let err = PatientDashboard::new(&backend, account("d1", Role::Doctor)).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::WrongRole { required: Role::Patient, .. }
        ));
    }

    #[tokio::test]
    async fn booking_creates_a_pending_appointment() {
        let backend = StubBackend::new();
        backend.add_user(account("d1", Role::Doctor));
        let mut dash = dash(&backend).await;
        assert_eq!(dash.doctors().len(), 1);

        dash.book_appointment("d1", Utc::now() + Duration::days(2), "lower back pain")
            .await
            .unwrap();

        assert_eq!(dash.appointments().len(), 1);
        let appt = &dash.appointments()[0];
        assert_eq!(appt.status, AppointmentStatus::Pending);
        assert_eq!(appt.patient_id, "p1");
        assert_eq!(appt.doctor_id, "d1");
    }

    #[tokio::test]
    async fn booking_validation_failures_preserve_state() {
        let backend = StubBackend::new();
        let mut dash = dash(&backend).await;

        let err = dash
            .book_appointment("d1", Utc::now() + Duration::days(1), "   ")
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::Booking(_)));

        let err = dash
            .book_appointment("d1", Utc::now() - Duration::hours(1), "fever")
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::Booking(_)));

        assert!(dash.appointments().is_empty(), "Nothing was created");
    }

    #[tokio::test]
    async fn patient_only_sees_own_records() {
        let backend = StubBackend::new();

        // Another patient books first.
        backend.set_actor(account("p2", Role::Patient));
        let mut other = PatientDashboard::new(&backend, account("p2", Role::Patient)).unwrap();
        other.refresh().await.unwrap();
        other
            .book_appointment("d1", Utc::now() + Duration::days(1), "headache")
            .await
            .unwrap();

        let dash = dash(&backend).await;
        assert!(dash.appointments().is_empty());
    }

    #[tokio::test]
    async fn report_fetch_is_gated_on_own_requests() {
        let backend = StubBackend::new();
        let dash = dash(&backend).await;
        let err = dash.view_report("rep-1").await.unwrap_err();
        assert!(matches!(err, DashboardError::NotPermitted(_)));
    }
}
