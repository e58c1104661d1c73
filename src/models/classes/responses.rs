use super::entities::{Class, ClassMember};
use serde::Serialize;
use ts_rs::TS;

// 班级列表项
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassSummary {
    #[serde(flatten)]
    #[ts(flatten)]
    pub class: Class,
    pub student_count: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassListResponse {
    pub items: Vec<ClassSummary>,
}

// 班级详情（含成员）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub class: Class,
    pub students: Vec<ClassMember>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct AddClassStudentsResponse {
    pub added: Vec<i64>,
}
