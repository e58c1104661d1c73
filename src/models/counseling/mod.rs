use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::{PaginationInfo, PaginationQuery, pagination::deserialize_optional_i64};

// 咨询记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/counseling.ts")]
pub struct CounselingNote {
    pub id: i64,
    pub academy_id: i64,
    pub student_id: i64,
    pub counselor_id: Option<i64>,
    pub counseling_date: chrono::NaiveDate,
    pub duration: Option<i32>,
    #[serde(rename = "type")]
    #[ts(rename = "type")]
    pub counseling_type: String,
    pub topic: String,
    pub content: String,
    pub action_items: Option<String>,
    pub follow_up_required: bool,
    pub is_confidential: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/counseling.ts")]
pub struct CounselingRecord {
    #[serde(flatten)]
    #[ts(flatten)]
    pub note: CounselingNote,
    pub student_name: String,
}

// 查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/counseling.ts")]
pub struct CounselingQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
}

// 列表查询（用于存储层）
#[derive(Debug, Clone)]
pub struct CounselingListQuery {
    pub academy_id: i64,
    pub page: u64,
    pub size: u64,
    pub student_id: Option<i64>,
    /// 非管理员只能看到自己的保密记录
    pub viewer_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/counseling.ts")]
pub struct CreateCounselingRequest {
    pub student_id: i64,
    pub counseling_date: Option<chrono::NaiveDate>,
    pub duration: Option<i32>,
    #[serde(rename = "type")]
    #[ts(rename = "type")]
    pub counseling_type: Option<String>,
    pub topic: Option<String>,
    pub content: String,
    pub action_items: Option<String>,
    #[serde(default)]
    pub follow_up_required: bool,
    #[serde(default)]
    pub is_confidential: bool,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/counseling.ts")]
pub struct UpdateCounselingRequest {
    pub counseling_date: Option<chrono::NaiveDate>,
    pub duration: Option<i32>,
    #[serde(rename = "type")]
    #[ts(rename = "type")]
    pub counseling_type: Option<String>,
    pub topic: Option<String>,
    pub content: Option<String>,
    pub action_items: Option<String>,
    pub follow_up_required: Option<bool>,
    pub is_confidential: Option<bool>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/counseling.ts")]
pub struct CounselingListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<CounselingRecord>,
}
