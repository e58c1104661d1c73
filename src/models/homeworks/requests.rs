use serde::Deserialize;
use ts_rs::TS;

// 创建作业
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct CreateHomeworkRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<chrono::NaiveDate>,
    pub subject: Option<String>,
    pub grade_level: Option<String>,
    #[serde(default)]
    pub class_ids: Vec<i64>,
}

// 更新作业（对象名单不随之变化）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct UpdateHomeworkRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<chrono::NaiveDate>,
    pub subject: Option<String>,
    pub grade_level: Option<String>,
}

// 批改
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct GradeSubmissionRequest {
    pub grade: String,
    pub feedback: Option<String>,
}

// 提交中的单个文件
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct SubmissionFileInput {
    pub file_key: String,
    pub file_name: String,
    pub file_url: String,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
}

// 学生提交作业
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct SubmitHomeworkRequest {
    pub content: Option<String>,
    #[serde(default)]
    pub files: Vec<SubmissionFileInput>,
}

// 预签名上传
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct PresignUploadRequest {
    pub file_name: String,
    pub content_type: Option<String>,
}
