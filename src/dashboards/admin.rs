//! Admin dashboard.
//!
//! Read/write over account records plus read-only aggregate statistics —
//! pure projections over the backend's counts at fetch time. Staleness
//! between fetches is expected and resolved by manual refresh.

use crate::api::WorkflowApi;
use crate::models::{Account, NewAccount, Role, SystemStats};

use super::{require_role, DashboardError};

#[derive(Debug)]
pub struct AdminDashboard<A> {
    api: A,
    identity: Account,
    users: Vec<Account>,
    stats: Option<SystemStats>,
}

impl<A: WorkflowApi> AdminDashboard<A> {
    pub fn new(api: A, identity: Account) -> Result<Self, DashboardError> {
        require_role(Role::Admin, identity.role)?;
        Ok(Self {
            api,
            identity,
            users: Vec::new(),
            stats: None,
        })
    }

    pub async fn refresh(&mut self) -> Result<(), DashboardError> {
        self.users = self.api.list_users().await?;
        self.stats = Some(self.api.get_stats().await?);
        Ok(())
    }

    // ── Read views ──────────────────────────────────────────

    pub fn users(&self) -> &[Account] {
        &self.users
    }

    /// Latest fetched aggregates; `None` before the first refresh.
    pub fn stats(&self) -> Option<&SystemStats> {
        self.stats.as_ref()
    }

    // ── Account management ──────────────────────────────────

    /// Create an account in any role via the shared registration endpoint.
    pub async fn create_account(&mut self, input: &NewAccount) -> Result<Account, DashboardError> {
        let created = self.api.register_account(input).await?;
        tracing::info!(role = created.role.as_str(), "Account created by admin");
        self.refresh().await?;
        Ok(created)
    }

    /// Delete an account. Deleting the signed-in admin is refused locally,
    /// matching the backend's own rule.
    pub async fn delete_account(&mut self, account_id: &str) -> Result<(), DashboardError> {
        if account_id == self.identity.id {
            return Err(DashboardError::NotPermitted("Cannot delete self".into()));
        }
        self.api.delete_user(account_id).await?;
        tracing::info!(account_id, "Account deleted");
        self.refresh().await
    }
}
