//! Lab technician dashboard.
//!
//! A shared, unassigned queue: every technician sees every request and may
//! upload a report for any pending one. Uploading is single-shot — the
//! backend stores the file, runs the external AI analysis, and atomically
//! completes the request with a freshly minted result id. The upload
//! control is never offered again once a request is completed.

use crate::api::WorkflowApi;
use crate::models::{Account, LabReport, LabRequest, LabRequestStatus, Role};
use crate::workflow;

use super::{require_role, DashboardError};

#[derive(Debug)]
pub struct LabDashboard<A> {
    api: A,
    identity: Account,
    requests: Vec<LabRequest>,
}

impl<A: WorkflowApi> LabDashboard<A> {
    pub fn new(api: A, identity: Account) -> Result<Self, DashboardError> {
        require_role(Role::LabTechnician, identity.role)?;
        Ok(Self {
            api,
            identity,
            requests: Vec::new(),
        })
    }

    pub async fn refresh(&mut self) -> Result<(), DashboardError> {
        let requests = self.api.list_lab_requests().await?;
        for request in &requests {
            // Backend defect, not a client crash: log and keep rendering.
            if !request.is_consistent() {
                tracing::warn!(id = request.id, "Lab request violates result/status coupling");
            }
        }
        self.requests = requests;
        Ok(())
    }

    // ── Read views ──────────────────────────────────────────

    pub fn requests(&self) -> &[LabRequest] {
        &self.requests
    }

    pub fn pending(&self) -> impl Iterator<Item = &LabRequest> {
        self.requests
            .iter()
            .filter(|r| r.status == LabRequestStatus::Pending)
    }

    /// Whether the upload control is rendered for this request.
    pub fn can_upload(&self, request: &LabRequest) -> bool {
        workflow::can_upload_report(&self.identity, request)
    }

    // ── Transitions ─────────────────────────────────────────

    /// Upload the report file for a pending request.
    pub async fn upload_report(
        &mut self,
        request_id: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<LabReport, DashboardError> {
        let request = self
            .requests
            .iter()
            .find(|r| r.id == request_id)
            .ok_or_else(|| DashboardError::UnknownEntity {
                kind: "lab request",
                id: request_id.to_string(),
            })?;
        if !workflow::can_upload_report(&self.identity, request) {
            return Err(DashboardError::NotPermitted(
                "This request already has a report".into(),
            ));
        }
        let report = self.api.upload_lab_report(request_id, filename, bytes).await?;
        tracing::info!(request_id, report_id = report.id, "Lab report uploaded");
        self.refresh().await?;
        Ok(report)
    }

    /// Lab staff may review any uploaded report.
    pub async fn view_report(&self, result_id: &str) -> Result<LabReport, DashboardError> {
        Ok(self.api.get_lab_report(result_id).await?)
    }
}
