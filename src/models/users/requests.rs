use serde::Deserialize;
use ts_rs::TS;

use super::entities::UserRole;

// 创建教职工账号
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateStaffRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: UserRole,
}

/// 写入教职工账号（存储层，密码已哈希）
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub academy_id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
}
