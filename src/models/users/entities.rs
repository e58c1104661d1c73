use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::string_enum;

string_enum! {
    /// 用户角色
    pub enum UserRole("用户角色", "../frontend/src/types/generated/user.ts") {
        Admin => "admin",
        Teacher => "teacher",
        Student => "student",
    }
}

impl UserRole {
    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    /// 管理后台可用角色
    pub fn staff_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Teacher]
    }
    pub fn student_roles() -> &'static [&'static UserRole] {
        &[&Self::Student]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Teacher, &Self::Student]
    }

    pub fn is_staff(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Teacher)
    }
}

string_enum! {
    /// 账号状态
    pub enum UserStatus("用户状态", "../frontend/src/types/generated/user.ts") {
        Active => "active",
        Inactive => "inactive",
        Suspended => "suspended",
    }
}

// 教职工账号
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub academy_id: i64,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_str() {
        for role in UserRole::ALL {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), *role);
        }
        assert!("user".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_deserialize_error_lists_values() {
        let err = serde_json::from_str::<UserRole>(r#""owner""#).unwrap_err();
        assert!(err.to_string().contains("admin, teacher, student"));
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let now = chrono::Utc::now();
        let user = User {
            id: 1,
            academy_id: 1,
            email: "admin@academy.test".to_string(),
            password_hash: "secret-hash".to_string(),
            name: "Admin".to_string(),
            role: UserRole::Admin,
            status: UserStatus::Active,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains(r#""role":"admin""#));
    }
}
