use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct Class {
    pub id: i64,
    pub academy_id: i64,
    pub name: String,
    pub grade_level: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    // 负责教师
    pub teacher_id: Option<i64>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 班级成员（在籍）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassMember {
    pub class_id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub student_number: Option<String>,
    pub grade: Option<String>,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}
