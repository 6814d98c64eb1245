//! Consultation draft.
//!
//! Ephemeral UI state for one consultation session: the doctor queues
//! medication line-items locally, in any order and any number of times,
//! and nothing is persisted until the whole list is submitted as one
//! prescription. Submitting also completes the appointment — that coupling
//! lives in [`super::DoctorDashboard::resolve_consultation`].

use crate::models::{Appointment, MedicationItem, NewPrescription};

use super::DashboardError;

/// A draft prescription for one appointment, held client-side only.
#[derive(Debug, Clone)]
pub struct Consultation {
    appointment_id: String,
    patient_id: String,
    symptoms: String,
    queued: Vec<MedicationItem>,
}

impl Consultation {
    pub(crate) fn for_appointment(appointment: &Appointment) -> Self {
        Self {
            appointment_id: appointment.id.clone(),
            patient_id: appointment.patient_id.clone(),
            symptoms: appointment.symptoms.clone(),
            queued: Vec::new(),
        }
    }

    pub fn appointment_id(&self) -> &str {
        &self.appointment_id
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    /// The symptoms the patient reported at booking, shown during consult.
    pub fn symptoms(&self) -> &str {
        &self.symptoms
    }

    /// Queued line-items, in the order they were added.
    pub fn medications(&self) -> &[MedicationItem] {
        &self.queued
    }

    /// Queue a medication line. A blank medicine name is refused; the other
    /// fields are free text and may be empty.
    pub fn add_medication(&mut self, item: MedicationItem) -> Result<(), DashboardError> {
        if item.medicine_name.trim().is_empty() {
            return Err(DashboardError::NotPermitted(
                "Medicine name is required".into(),
            ));
        }
        self.queued.push(item);
        Ok(())
    }

    /// Drop a queued line by position. Out-of-range is a no-op.
    pub fn remove_medication(&mut self, index: usize) {
        if index < self.queued.len() {
            self.queued.remove(index);
        }
    }

    /// The "send to pharmacy" action is only offered once at least one
    /// medication is queued.
    pub fn can_submit(&self) -> bool {
        !self.queued.is_empty()
    }

    pub(crate) fn into_prescription(self) -> Result<NewPrescription, DashboardError> {
        if self.queued.is_empty() {
            return Err(DashboardError::EmptyPrescription);
        }
        Ok(NewPrescription {
            appointment_id: self.appointment_id,
            patient_id: self.patient_id,
            medications: self.queued,
            notes: Some("Consultation".into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentStatus;
    use chrono::Utc;

    fn draft() -> Consultation {
        Consultation::for_appointment(&Appointment {
            id: "a1".into(),
            patient_id: "p1".into(),
            doctor_id: "d1".into(),
            date_time: Utc::now(),
            symptoms: "chest pain".into(),
            status: AppointmentStatus::Confirmed,
            created_at: None,
        })
    }

    fn med(name: &str) -> MedicationItem {
        MedicationItem {
            medicine_name: name.into(),
            dosage: "500mg".into(),
            frequency: "2x daily".into(),
            duration: "5 days".into(),
        }
    }

    #[test]
    fn empty_draft_cannot_submit() {
        let c = draft();
        assert!(!c.can_submit());
        assert!(matches!(
            c.into_prescription(),
            Err(DashboardError::EmptyPrescription)
        ));
    }

    #[test]
    fn one_medication_is_the_boundary() {
        let mut c = draft();
        c.add_medication(med("Aspirin")).unwrap();
        assert!(c.can_submit());
    }

    #[test]
    fn blank_name_is_refused() {
        let mut c = draft();
        assert!(c.add_medication(med("  ")).is_err());
        assert!(c.medications().is_empty());
    }

    #[test]
    fn queue_preserves_order_and_supports_removal() {
        let mut c = draft();
        c.add_medication(med("Aspirin")).unwrap();
        c.add_medication(med("Ibuprofen")).unwrap();
        c.add_medication(med("Paracetamol")).unwrap();

        c.remove_medication(1);
        let names: Vec<_> = c.medications().iter().map(|m| m.medicine_name.as_str()).collect();
        assert_eq!(names, ["Aspirin", "Paracetamol"]);

        // Out of range: no-op
        c.remove_medication(99);
        assert_eq!(c.medications().len(), 2);
    }

    #[test]
    fn submission_carries_the_queued_lines() {
        let mut c = draft();
        c.add_medication(med("Aspirin")).unwrap();
        c.add_medication(med("Ibuprofen")).unwrap();

        let rx = c.into_prescription().unwrap();
        assert_eq!(rx.appointment_id, "a1");
        assert_eq!(rx.patient_id, "p1");
        assert_eq!(rx.medications.len(), 2);
        assert_eq!(rx.medications[0].medicine_name, "Aspirin");
    }
}
