use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::string_enum;

string_enum! {
    /// 学生状态
    pub enum StudentStatus("学生状态", "../frontend/src/types/generated/student.ts") {
        Active => "active",
        Inactive => "inactive",
    }
}

// 学生
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub academy_id: i64,
    pub name: String,
    pub student_number: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub grade: Option<String>,
    pub parent_phone: Option<String>,
    pub parent_name: Option<String>,
    pub memo: Option<String>,
    pub status: StudentStatus,
    pub is_linked: bool,
    pub linked_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 学生邀请
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentInvite {
    pub id: i64,
    pub student_id: i64,
    pub token: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub used_at: Option<chrono::DateTime<chrono::Utc>>,
    pub used_by_user_account_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 邀请状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteState {
    Valid,
    Expired,
    Used,
}

impl StudentInvite {
    pub fn state_at(&self, now: chrono::DateTime<chrono::Utc>) -> InviteState {
        if self.used_at.is_some() {
            InviteState::Used
        } else if self.expires_at <= now {
            InviteState::Expired
        } else {
            InviteState::Valid
        }
    }
}

/// 第三方登录账号
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    pub provider: String,
    pub provider_user_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// OAuth 提供方返回的用户资料
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    pub provider: String,
    pub provider_user_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn invite(expires_in: Duration, used: bool) -> StudentInvite {
        let now = Utc::now();
        StudentInvite {
            id: 1,
            student_id: 1,
            token: "token".to_string(),
            expires_at: now + expires_in,
            used_at: used.then_some(now),
            used_by_user_account_id: None,
            created_at: now,
        }
    }

    #[test]
    fn test_invite_state() {
        let now = Utc::now();
        assert_eq!(invite(Duration::days(7), false).state_at(now), InviteState::Valid);
        assert_eq!(invite(Duration::days(-1), false).state_at(now), InviteState::Expired);
        // 已使用优先于过期
        assert_eq!(invite(Duration::days(-1), true).state_at(now), InviteState::Used);
    }
}
