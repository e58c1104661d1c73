use serde::Deserialize;
use ts_rs::TS;

use super::entities::StudentStatus;
use crate::models::common::PaginationQuery;

// 创建学生
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub name: String,
    pub student_number: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub grade: Option<String>,
    pub parent_phone: Option<String>,
    pub parent_name: Option<String>,
    pub memo: Option<String>,
}

// 部分更新学生
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub student_number: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub grade: Option<String>,
    pub parent_phone: Option<String>,
    pub parent_name: Option<String>,
    pub memo: Option<String>,
    pub status: Option<StudentStatus>,
}

// 学生列表查询参数（来自HTTP请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<StudentStatus>,
    pub search: Option<String>,
}

// 学生列表查询（用于存储层）
#[derive(Debug, Clone)]
pub struct StudentListQuery {
    pub academy_id: i64,
    pub page: u64,
    pub size: u64,
    pub status: Option<StudentStatus>,
    pub search: Option<String>,
}

// 邀请令牌
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct InviteTokenQuery {
    pub token: String,
}

// OAuth 回调参数
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}
