//! Pharmacy dashboard.
//!
//! A shared queue over all prescriptions; any pharmacy account may dispense
//! any pending one. Dispensing is one-way and idempotent at this layer: a
//! second attempt on an already-dispensed prescription (double-click, stale
//! view) is a local no-op, never an error the user has to resolve.

use crate::api::WorkflowApi;
use crate::models::{Account, Prescription, Role};
use crate::workflow;

use super::{require_role, DashboardError};

#[derive(Debug)]
pub struct PharmacyDashboard<A> {
    api: A,
    identity: Account,
    prescriptions: Vec<Prescription>,
}

impl<A: WorkflowApi> PharmacyDashboard<A> {
    pub fn new(api: A, identity: Account) -> Result<Self, DashboardError> {
        require_role(Role::Pharmacy, identity.role)?;
        Ok(Self {
            api,
            identity,
            prescriptions: Vec::new(),
        })
    }

    pub async fn refresh(&mut self) -> Result<(), DashboardError> {
        self.prescriptions = self.api.list_prescriptions().await?;
        Ok(())
    }

    // ── Read views ──────────────────────────────────────────

    pub fn prescriptions(&self) -> &[Prescription] {
        &self.prescriptions
    }

    /// Undispensed prescriptions awaiting handout.
    pub fn queue(&self) -> impl Iterator<Item = &Prescription> {
        self.prescriptions.iter().filter(|p| !p.is_dispensed)
    }

    /// Whether the dispense control is rendered for this prescription.
    pub fn can_dispense(&self, prescription: &Prescription) -> bool {
        workflow::can_dispense(&self.identity, prescription)
    }

    // ── Transitions ─────────────────────────────────────────

    /// Mark a prescription's medications as handed to the patient.
    pub async fn dispense(&mut self, prescription_id: &str) -> Result<(), DashboardError> {
        let prescription = self
            .prescriptions
            .iter()
            .find(|p| p.id == prescription_id)
            .ok_or_else(|| DashboardError::UnknownEntity {
                kind: "prescription",
                id: prescription_id.to_string(),
            })?;
        if prescription.is_dispensed {
            // Already satisfied — swallow the double-click.
            tracing::debug!(prescription_id, "Dispense skipped, already dispensed");
            return Ok(());
        }
        if !workflow::can_dispense(&self.identity, prescription) {
            return Err(DashboardError::NotPermitted(
                "Only pharmacy staff dispense medication".into(),
            ));
        }
        self.api.dispense_prescription(prescription_id).await?;
        tracing::info!(prescription_id, "Medication dispensed");
        self.refresh().await
    }
}
