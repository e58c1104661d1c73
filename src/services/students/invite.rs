use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::StudentService;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{
        entities::{Student, StudentInvite},
        responses::StudentInviteResponse,
    },
};
use crate::services::common::{current_user, internal_error, not_found};
use crate::storage::Storage;
use crate::utils::random_code::generate_invite_token;

/// 邀请链接，前端注册页会读取 token 参数
pub(crate) fn invite_response(invite: &StudentInvite, student_name: &str) -> StudentInviteResponse {
    let invite_link = format!(
        "{}/student/signup?token={}",
        AppConfig::get().frontend_base(),
        invite.token
    );
    StudentInviteResponse {
        // 前端用同一链接生成二维码
        qr_code_data: invite_link.clone(),
        invite_link,
        expires_at: invite.expires_at,
        student_name: student_name.to_string(),
    }
}

/// 删除旧邀请并生成新邀请
pub(crate) async fn create_invite(
    storage: &Arc<dyn Storage>,
    student: &Student,
) -> Result<StudentInviteResponse> {
    let expiry_days = AppConfig::get().invite.expiry_days;
    let expires_at = chrono::Utc::now().timestamp() + expiry_days * 24 * 3600;
    let token = generate_invite_token();

    let invite = storage
        .replace_student_invite(student.id, &token, expires_at)
        .await?;
    Ok(invite_response(&invite, &student.name))
}

pub async fn issue_invite(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    let student = match storage.get_student(user.academy_id, id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Ok(internal_error("Failed to generate invite", e)),
    };

    match create_invite(&storage, &student).await {
        Ok(invite) => {
            tracing::info!("Invite issued for student {} by user {}", student.id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                invite,
                "Invite generated successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to generate invite", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_response_links_to_signup() {
        let invite = StudentInvite {
            id: 1,
            student_id: 3,
            token: "tok123".to_string(),
            expires_at: chrono::Utc::now(),
            used_at: None,
            used_by_user_account_id: None,
            created_at: chrono::Utc::now(),
        };
        let resp = invite_response(&invite, "이서연");
        assert!(resp.invite_link.ends_with("/student/signup?token=tok123"));
        assert_eq!(resp.qr_code_data, resp.invite_link);
        assert_eq!(resp.student_name, "이서연");
    }
}
