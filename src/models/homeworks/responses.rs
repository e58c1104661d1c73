use serde::Serialize;
use ts_rs::TS;

use super::entities::{Homework, Submission, SubmissionFile, SubmissionStatus};

// 作业列表项
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct HomeworkSummary {
    #[serde(flatten)]
    #[ts(flatten)]
    pub homework: Homework,
    pub target_count: i64,
    pub class_names: Vec<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct HomeworkListResponse {
    pub items: Vec<HomeworkSummary>,
}

// 对象学生及其提交情况
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct TargetSubmission {
    pub student_id: i64,
    pub student_name: String,
    pub class_name: Option<String>,
    pub submission_id: Option<i64>,
    pub status: SubmissionStatus,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub content: Option<String>,
    pub grade: Option<String>,
    pub feedback: Option<String>,
    pub files: Vec<SubmissionFile>,
}

impl TargetSubmission {
    pub fn merge(
        student_id: i64,
        student_name: String,
        class_name: Option<String>,
        submission: Option<Submission>,
    ) -> Self {
        match submission {
            Some(s) => Self {
                student_id,
                student_name,
                class_name,
                submission_id: Some(s.id),
                status: s.status,
                submitted_at: s.submitted_at,
                content: s.content,
                grade: s.grade,
                feedback: s.feedback,
                files: s.files,
            },
            None => Self {
                student_id,
                student_name,
                class_name,
                submission_id: None,
                status: SubmissionStatus::Pending,
                submitted_at: None,
                content: None,
                grade: None,
                feedback: None,
                files: Vec::new(),
            },
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct SubmissionListResponse {
    pub homework_id: i64,
    pub items: Vec<TargetSubmission>,
}

// 学生视角的作业
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct StudentHomework {
    #[serde(flatten)]
    #[ts(flatten)]
    pub homework: Homework,
    pub submission: Option<Submission>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct StudentHomeworkListResponse {
    pub items: Vec<StudentHomework>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct PresignUploadResponse {
    pub upload_url: String,
    pub file_key: String,
    pub public_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_without_submission_is_pending() {
        let view = TargetSubmission::merge(7, "Kim".to_string(), Some("A반".to_string()), None);
        assert_eq!(view.status, SubmissionStatus::Pending);
        assert!(view.submission_id.is_none());
        assert!(view.files.is_empty());
    }
}
