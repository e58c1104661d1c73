use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::string_enum;

string_enum! {
    /// 提交状态
    pub enum SubmissionStatus("提交状态", "../frontend/src/types/generated/homework.ts") {
        Pending => "pending",
        Submitted => "submitted",
        Graded => "graded",
    }
}

// 作业
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct Homework {
    pub id: i64,
    pub academy_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<chrono::NaiveDate>,
    pub subject: Option<String>,
    pub grade_level: Option<String>,
    pub class_ids: Vec<i64>,
    pub created_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 作业对象（创建时从班级成员快照）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct HomeworkTarget {
    pub homework_id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub class_id: Option<i64>,
    pub class_name: Option<String>,
}

// 提交附件
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct SubmissionFile {
    pub id: i64,
    pub file_key: String,
    pub file_name: String,
    pub file_url: String,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub upload_order: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 作业提交
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct Submission {
    pub id: i64,
    pub homework_id: i64,
    pub student_id: i64,
    pub content: Option<String>,
    pub status: SubmissionStatus,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub grade: Option<String>,
    pub feedback: Option<String>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub graded_by: Option<i64>,
    pub files: Vec<SubmissionFile>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
