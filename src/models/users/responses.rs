use serde::Serialize;
use ts_rs::TS;

use super::entities::User;

// 教职工列表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct StaffListResponse {
    pub items: Vec<User>,
}
