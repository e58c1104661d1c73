use serde::Serialize;
use ts_rs::TS;

use super::entities::Student;
use crate::models::common::PaginationInfo;

// 学生列表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Student>,
}

// 邀请链接
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentInviteResponse {
    pub invite_link: String,
    pub qr_code_data: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub student_name: String,
}

// 创建学生的响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentCreatedResponse {
    pub student: Student,
    pub invite: StudentInviteResponse,
}

// 邀请校验结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct InviteVerifyResponse {
    pub valid: bool,
    pub student_name: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentStats {
    /// 本月出勤次数
    pub attendance: i64,
    pub pending_homework: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct RecentNotice {
    pub id: i64,
    pub title: String,
    pub is_important: bool,
    /// 相对日期，例如 "3일 전"
    pub date: String,
}

// 学生门户首页
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentProfileResponse {
    pub id: i64,
    pub name: String,
    pub academy_name: String,
    pub student_number: Option<String>,
    pub grade: Option<String>,
    pub stats: StudentStats,
    pub recent_notices: Vec<RecentNotice>,
}
