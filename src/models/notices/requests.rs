use serde::Deserialize;
use ts_rs::TS;

use super::entities::NoticeStatus;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notice.ts")]
pub struct NoticeAttachmentInput {
    pub file_key: String,
    pub file_name: String,
    pub file_url: String,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
}

// 创建公告
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notice.ts")]
pub struct CreateNoticeRequest {
    pub title: String,
    pub body: String,
    pub class_ids: Vec<i64>,
    pub status: Option<NoticeStatus>,
    #[serde(default)]
    pub is_important: bool,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub attachments: Vec<NoticeAttachmentInput>,
}

// 更新公告
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notice.ts")]
pub struct UpdateNoticeRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub class_ids: Option<Vec<i64>>,
    pub status: Option<NoticeStatus>,
    pub is_important: Option<bool>,
    pub is_pinned: Option<bool>,
}
