use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学院
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academy.ts")]
pub struct Academy {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub owner_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    pub subscription_tier: String,
    pub subscription_status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 新建学院（启动初始化使用）
#[derive(Debug, Clone)]
pub struct CreateAcademy {
    pub name: String,
    pub code: String,
    pub owner_name: Option<String>,
    pub contact_email: Option<String>,
}

// 更新学院信息
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academy.ts")]
pub struct UpdateAcademyRequest {
    pub name: Option<String>,
    pub owner_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
}
