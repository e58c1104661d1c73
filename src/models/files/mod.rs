use serde::Serialize;
use ts_rs::TS;

// 文件上传结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct UploadedFileResponse {
    pub file_key: String,
    pub file_name: String,
    pub file_url: String,
    pub file_size: i64,
    pub mime_type: Option<String>,
}
