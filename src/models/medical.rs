use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{LabRequestStatus, TestType};

/// One medication line on a prescription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationItem {
    pub medicine_name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

/// A prescription as the backend returns it.
///
/// `is_dispensed` flips false → true exactly once, by pharmacy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: String,
    pub appointment_id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub medications: Vec<MedicationItem>,
    pub notes: Option<String>,
    #[serde(default)]
    pub is_dispensed: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Prescription creation input (doctor only). The backend stamps doctor_id.
#[derive(Debug, Clone, Serialize)]
pub struct NewPrescription {
    pub appointment_id: String,
    pub patient_id: String,
    pub medications: Vec<MedicationItem>,
    pub notes: Option<String>,
}

/// A lab request as the backend returns it.
///
/// `result_id` is set atomically with `status` becoming completed and is
/// never cleared afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabRequest {
    pub id: String,
    pub appointment_id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub test_type: TestType,
    pub notes: Option<String>,
    pub status: LabRequestStatus,
    pub result_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl LabRequest {
    /// The completed ⇔ result_id invariant the client relies on. A record
    /// violating it is a backend defect; callers log and skip, never crash.
    pub fn is_consistent(&self) -> bool {
        match self.status {
            LabRequestStatus::Pending => self.result_id.is_none(),
            LabRequestStatus::Completed => self.result_id.is_some(),
        }
    }
}

/// Lab request creation input (doctor only).
#[derive(Debug, Clone, Serialize)]
pub struct NewLabRequest {
    pub appointment_id: String,
    pub patient_id: String,
    pub test_type: TestType,
    pub notes: Option<String>,
}

/// An uploaded lab report with its AI analysis payload.
///
/// `ai_analysis_result` is opaque to the client — rendered verbatim,
/// never interpreted beyond presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabReport {
    pub id: String,
    pub lab_request_id: String,
    pub report_url: Option<String>,
    pub ai_analysis_result: Option<serde_json::Value>,
    pub technician_id: String,
    pub created_at: Option<DateTime<Utc>>,
}
