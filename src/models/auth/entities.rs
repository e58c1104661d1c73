use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserRole;

/// 已认证的请求主体
///
/// 教职工的 `id` 为 users.id，学生的 `id` 为 students.id。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct CurrentUser {
    pub id: i64,
    pub academy_id: i64,
    pub role: UserRole,
    pub name: String,
    pub email: Option<String>,
    /// 学生绑定的第三方账号
    pub user_account_id: Option<i64>,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }
}
