//! Per-role dashboard controllers.
//!
//! One controller per role, each owning a refreshable cache of its filtered
//! entity views and a restricted subset of transitions. Controllers expose
//! state and action-availability; the presentation layer renders whatever
//! they hold and never talks to the transport directly.
//!
//! Reconciliation: after every mutation the controller refetches the full
//! list instead of patching local state — a brief staleness window traded
//! for simplicity. A failed mutation leaves the cache untouched.

pub mod admin;
pub mod consult;
pub mod doctor;
pub mod lab;
pub mod patient;
pub mod pharmacy;

pub use admin::AdminDashboard;
pub use consult::Consultation;
pub use doctor::DoctorDashboard;
pub use lab::LabDashboard;
pub use patient::PatientDashboard;
pub use pharmacy::PharmacyDashboard;

use crate::api::{ApiError, WorkflowApi};
use crate::models::appointment::BookingError;
use crate::models::{PublicStats, Role};

/// Errors from dashboard operations.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Constructing a controller for an identity of the wrong role.
    #[error("This dashboard requires the {req} role (identity is {act})",
        req = .required.as_str(), act = .actual.as_str())]
    WrongRole { required: Role, actual: Role },
    /// The action is not offered for this actor/entity state.
    #[error("{0}")]
    NotPermitted(String),
    /// The referenced entity is not in the current cache.
    #[error("Unknown {kind} id: {id}")]
    UnknownEntity { kind: &'static str, id: String },
    /// A prescription needs at least one queued medication.
    #[error("Cannot send an empty prescription to pharmacy")]
    EmptyPrescription,
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Role check shared by the controller constructors.
fn require_role(required: Role, actual: Role) -> Result<(), DashboardError> {
    if actual == required {
        Ok(())
    } else {
        Err(DashboardError::WrongRole { required, actual })
    }
}

/// Landing-page statistics — the one call made before any login.
pub async fn landing_stats<A: WorkflowApi>(api: &A) -> Result<PublicStats, ApiError> {
    api.get_public_stats().await
}

// ═══════════════════════════════════════════════════════════
// In-memory backend stub (tests)
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
pub(crate) mod stub {
    use std::sync::Mutex;

    use crate::api::{ApiError, WorkflowApi};
    use crate::models::{
        Account, Appointment, AppointmentStatus, LabReport, LabRequest, LabRequestStatus,
        NewAccount, NewAppointment, NewLabRequest, NewPrescription, Prescription, PublicStats,
        Role, SystemStats,
    };

    pub fn account(id: &str, role: Role) -> Account {
        Account {
            id: id.into(),
            email: format!("{id}@clinic.test"),
            full_name: id.into(),
            role,
            gender: None,
            height: None,
            weight: None,
            sleep_routine: None,
            verification_document: None,
            is_verified: true,
        }
    }

    #[derive(Debug, Default)]
    struct StubState {
        appointments: Vec<Appointment>,
        prescriptions: Vec<Prescription>,
        lab_requests: Vec<LabRequest>,
        reports: Vec<LabReport>,
        users: Vec<Account>,
        actor: Option<Account>,
        next_id: u32,
        /// Injected failure for the next mutating call.
        fail_next: Option<ApiError>,
    }

    /// In-memory stand-in for the backend. Mirrors the server's stamping
    /// and per-role list filtering so controller tests exercise the same
    /// contract the real backend provides.
    #[derive(Debug, Default)]
    pub struct StubBackend {
        state: Mutex<StubState>,
    }

    impl StubBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Who the bearer token identifies for subsequent calls.
        pub fn set_actor(&self, actor: Account) {
            self.state.lock().unwrap().actor = Some(actor);
        }

        pub fn add_user(&self, user: Account) {
            self.state.lock().unwrap().users.push(user);
        }

        /// Make the next mutating call fail with `error`.
        pub fn fail_next(&self, error: ApiError) {
            self.state.lock().unwrap().fail_next = Some(error);
        }

        pub fn appointment(&self, id: &str) -> Option<Appointment> {
            self.state
                .lock()
                .unwrap()
                .appointments
                .iter()
                .find(|a| a.id == id)
                .cloned()
        }

        pub fn prescription_count(&self) -> usize {
            self.state.lock().unwrap().prescriptions.len()
        }
    }

    impl StubState {
        fn mint_id(&mut self, prefix: &str) -> String {
            self.next_id += 1;
            format!("{prefix}-{}", self.next_id)
        }

        fn actor(&self) -> Account {
            self.actor.clone().expect("Stub actor not set")
        }

        fn take_failure(&mut self) -> Result<(), ApiError> {
            match self.fail_next.take() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }
    }

    impl WorkflowApi for StubBackend {
        async fn list_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
            let state = self.state.lock().unwrap();
            let actor = state.actor();
            Ok(state
                .appointments
                .iter()
                .filter(|a| match actor.role {
                    Role::Patient => a.patient_id == actor.id,
                    Role::Doctor => a.doctor_id == actor.id,
                    _ => true,
                })
                .cloned()
                .collect())
        }

        async fn create_appointment(
            &self,
            input: &NewAppointment,
        ) -> Result<Appointment, ApiError> {
            let mut state = self.state.lock().unwrap();
            state.take_failure()?;
            let actor = state.actor();
            let id = state.mint_id("appt");
            let appt = Appointment {
                id,
                patient_id: actor.id,
                doctor_id: input.doctor_id.clone(),
                date_time: input.date_time,
                symptoms: input.symptoms.clone(),
                status: AppointmentStatus::Pending,
                created_at: None,
            };
            state.appointments.push(appt.clone());
            Ok(appt)
        }

        async fn update_appointment_status(
            &self,
            id: &str,
            status: AppointmentStatus,
        ) -> Result<Appointment, ApiError> {
            let mut state = self.state.lock().unwrap();
            state.take_failure()?;
            let actor = state.actor();
            let appt = state
                .appointments
                .iter_mut()
                .find(|a| a.id == id && a.doctor_id == actor.id)
                .ok_or_else(|| {
                    ApiError::NotFound("Appointment not found or not authorized".into())
                })?;
            appt.status = status;
            Ok(appt.clone())
        }

        async fn list_prescriptions(&self) -> Result<Vec<Prescription>, ApiError> {
            let state = self.state.lock().unwrap();
            let actor = state.actor();
            Ok(state
                .prescriptions
                .iter()
                .filter(|p| match actor.role {
                    Role::Patient => p.patient_id == actor.id,
                    Role::Doctor => p.doctor_id == actor.id,
                    _ => true,
                })
                .cloned()
                .collect())
        }

        async fn create_prescription(
            &self,
            input: &NewPrescription,
        ) -> Result<Prescription, ApiError> {
            let mut state = self.state.lock().unwrap();
            state.take_failure()?;
            let actor = state.actor();
            let id = state.mint_id("rx");
            let rx = Prescription {
                id,
                appointment_id: input.appointment_id.clone(),
                patient_id: input.patient_id.clone(),
                doctor_id: actor.id,
                medications: input.medications.clone(),
                notes: input.notes.clone(),
                is_dispensed: false,
                created_at: None,
            };
            state.prescriptions.push(rx.clone());
            Ok(rx)
        }

        async fn dispense_prescription(&self, id: &str) -> Result<Prescription, ApiError> {
            let mut state = self.state.lock().unwrap();
            state.take_failure()?;
            let rx = state
                .prescriptions
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| ApiError::NotFound("Prescription not found".into()))?;
            rx.is_dispensed = true;
            Ok(rx.clone())
        }

        async fn list_lab_requests(&self) -> Result<Vec<LabRequest>, ApiError> {
            let state = self.state.lock().unwrap();
            let actor = state.actor();
            Ok(state
                .lab_requests
                .iter()
                .filter(|r| match actor.role {
                    Role::Patient => r.patient_id == actor.id,
                    Role::Doctor => r.doctor_id == actor.id,
                    _ => true,
                })
                .cloned()
                .collect())
        }

        async fn create_lab_request(
            &self,
            input: &NewLabRequest,
        ) -> Result<LabRequest, ApiError> {
            let mut state = self.state.lock().unwrap();
            state.take_failure()?;
            let actor = state.actor();
            let id = state.mint_id("lr");
            let req = LabRequest {
                id,
                appointment_id: input.appointment_id.clone(),
                patient_id: input.patient_id.clone(),
                doctor_id: actor.id,
                test_type: input.test_type,
                notes: input.notes.clone(),
                status: LabRequestStatus::Pending,
                result_id: None,
                created_at: None,
            };
            state.lab_requests.push(req.clone());
            Ok(req)
        }

        async fn upload_lab_report(
            &self,
            request_id: &str,
            filename: &str,
            _bytes: Vec<u8>,
        ) -> Result<LabReport, ApiError> {
            let mut state = self.state.lock().unwrap();
            state.take_failure()?;
            let actor = state.actor();
            let report_id = state.mint_id("rep");
            let report = LabReport {
                id: report_id.clone(),
                lab_request_id: request_id.to_string(),
                report_url: Some(format!("uploads/{filename}")),
                ai_analysis_result: Some(serde_json::json!({
                    "diagnosis": "Normal",
                    "confidence": 0.98,
                    "details": "No anomalies detected in the scan."
                })),
                technician_id: actor.id,
                created_at: None,
            };
            let req = state
                .lab_requests
                .iter_mut()
                .find(|r| r.id == request_id)
                .ok_or_else(|| ApiError::NotFound("Invalid Request ID".into()))?;
            req.status = LabRequestStatus::Completed;
            req.result_id = Some(report_id);
            state.reports.push(report.clone());
            Ok(report)
        }

        async fn get_lab_report(&self, result_id: &str) -> Result<LabReport, ApiError> {
            let state = self.state.lock().unwrap();
            state
                .reports
                .iter()
                .find(|r| r.id == result_id)
                .cloned()
                .ok_or_else(|| ApiError::NotFound("Report not found".into()))
        }

        async fn list_doctors(&self) -> Result<Vec<Account>, ApiError> {
            let state = self.state.lock().unwrap();
            Ok(state
                .users
                .iter()
                .filter(|u| u.role == Role::Doctor)
                .cloned()
                .collect())
        }

        async fn list_users(&self) -> Result<Vec<Account>, ApiError> {
            Ok(self.state.lock().unwrap().users.clone())
        }

        async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
            let mut state = self.state.lock().unwrap();
            state.take_failure()?;
            let before = state.users.len();
            state.users.retain(|u| u.id != id);
            if state.users.len() == before {
                return Err(ApiError::NotFound("User not found".into()));
            }
            Ok(())
        }

        async fn register_account(&self, input: &NewAccount) -> Result<Account, ApiError> {
            let mut state = self.state.lock().unwrap();
            state.take_failure()?;
            if state.users.iter().any(|u| u.email == input.email) {
                return Err(ApiError::Validation("Email already registered".into()));
            }
            let id = state.mint_id("user");
            let created = Account {
                id,
                email: input.email.clone(),
                full_name: input.full_name.clone(),
                role: input.role,
                gender: input.gender.clone(),
                height: input.height.clone(),
                weight: input.weight.clone(),
                sleep_routine: input.sleep_routine.clone(),
                verification_document: input
                    .verification_document
                    .as_ref()
                    .map(|(name, _)| name.clone()),
                is_verified: input.role == Role::Patient,
            };
            state.users.push(created.clone());
            Ok(created)
        }

        async fn get_stats(&self) -> Result<SystemStats, ApiError> {
            use crate::models::{ChartSlice, StatsOverview, SystemCharts};
            let state = self.state.lock().unwrap();
            let completed = state
                .appointments
                .iter()
                .filter(|a| a.status == AppointmentStatus::Completed)
                .count() as u64;
            Ok(SystemStats {
                overview: StatsOverview {
                    total_users: state.users.len() as u64,
                    total_appointments: state.appointments.len() as u64,
                    completed_appointments: completed,
                    total_prescriptions: state.prescriptions.len() as u64,
                    dispensed_prescriptions: state
                        .prescriptions
                        .iter()
                        .filter(|p| p.is_dispensed)
                        .count() as u64,
                    revenue: completed * 50,
                },
                charts: SystemCharts {
                    user_roles: vec![],
                    appointment_status: vec![],
                    lab_requests: vec![ChartSlice {
                        name: "Completed".into(),
                        value: state
                            .lab_requests
                            .iter()
                            .filter(|r| r.status == LabRequestStatus::Completed)
                            .count() as u64,
                    }],
                },
            })
        }

        async fn get_public_stats(&self) -> Result<PublicStats, ApiError> {
            let state = self.state.lock().unwrap();
            Ok(PublicStats {
                patients: state.users.iter().filter(|u| u.role == Role::Patient).count() as u64,
                doctors: state.users.iter().filter(|u| u.role == Role::Doctor).count() as u64,
                lab_reports_analyzed: state
                    .lab_requests
                    .iter()
                    .filter(|r| r.status == LabRequestStatus::Completed)
                    .count() as u64,
                accuracy_rate: 98,
            })
        }
    }
}
