use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DashboardStats {
    pub total_students: i64,
    pub today_attendance: i64,
    pub monthly_revenue: i64,
}

// 最近动态
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct ActivityItem {
    #[serde(rename = "type")]
    #[ts(rename = "type")]
    pub activity_type: String,
    pub message: String,
    pub time_ago: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DashboardResponse {
    pub academy_name: String,
    pub stats: DashboardStats,
    pub recent_activity: Vec<ActivityItem>,
}
