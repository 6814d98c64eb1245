use serde::{Deserialize, Serialize};

/// One slice of a partitioned count ("doctor" → 12).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSlice {
    pub name: String,
    pub value: u64,
}

/// Headline counters on the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOverview {
    pub total_users: u64,
    pub total_appointments: u64,
    pub completed_appointments: u64,
    pub total_prescriptions: u64,
    pub dispensed_prescriptions: u64,
    /// Backend wire field is misspelled; kept verbatim.
    #[serde(rename = "revnue")]
    pub revenue: u64,
}

/// Partitioned counts for the admin charts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemCharts {
    pub user_roles: Vec<ChartSlice>,
    pub appointment_status: Vec<ChartSlice>,
    pub lab_requests: Vec<ChartSlice>,
}

/// Full `/admin/stats` response. Pure projection over backend counts at
/// fetch time; staleness is resolved by manual refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStats {
    pub overview: StatsOverview,
    pub charts: SystemCharts,
}

/// Public subset for the unauthenticated landing page (`/admin/public-stats`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicStats {
    pub patients: u64,
    pub doctors: u64,
    pub lab_reports_analyzed: u64,
    /// Backend-fixed constant, mirrored as an opaque number.
    pub accuracy_rate: u64,
}
