use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::string_enum;

string_enum! {
    /// 公告状态
    pub enum NoticeStatus("公告状态", "../frontend/src/types/generated/notice.ts") {
        Draft => "draft",
        Published => "published",
    }
}

// 公告
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notice.ts")]
pub struct Notice {
    pub id: i64,
    pub academy_id: i64,
    pub title: String,
    pub body: String,
    pub status: NoticeStatus,
    pub is_important: bool,
    pub is_pinned: bool,
    pub view_count: i64,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 公告附件
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notice.ts")]
pub struct NoticeAttachment {
    pub id: i64,
    pub file_key: String,
    pub file_name: String,
    pub file_url: String,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
}

// 目标班级
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notice.ts")]
pub struct NoticeTargetClass {
    pub class_id: i64,
    pub class_name: String,
}
