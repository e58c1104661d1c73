use serde::Serialize;
use ts_rs::TS;

use super::entities::{Notice, NoticeAttachment, NoticeTargetClass};

// 公告列表项
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notice.ts")]
pub struct NoticeSummary {
    #[serde(flatten)]
    #[ts(flatten)]
    pub notice: Notice,
    pub target_count: i64,
    pub attachment_count: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notice.ts")]
pub struct NoticeListResponse {
    pub items: Vec<NoticeSummary>,
}

// 公告详情
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notice.ts")]
pub struct NoticeDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub notice: Notice,
    pub target_classes: Vec<NoticeTargetClass>,
    pub attachments: Vec<NoticeAttachment>,
}
