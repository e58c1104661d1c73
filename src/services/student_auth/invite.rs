use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::StudentAuthService;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{
        entities::{InviteState, Student, StudentInvite},
        requests::InviteTokenQuery,
        responses::InviteVerifyResponse,
    },
};
use crate::services::common::internal_error;
use crate::storage::Storage;

/// 查询邀请并检查是否仍可使用，不可用时返回对应的错误响应
pub(crate) async fn load_valid_invite(
    storage: &Arc<dyn Storage>,
    token: &str,
) -> Result<(StudentInvite, Student), HttpResponse> {
    let (invite, student) = match storage.get_invite_by_token(token).await {
        Ok(Some(found)) => found,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::InviteNotFound,
                "Invalid invite link",
            )));
        }
        Err(e) => return Err(internal_error("Failed to verify invite", e)),
    };

    match invite.state_at(chrono::Utc::now()) {
        InviteState::Valid => Ok((invite, student)),
        InviteState::Expired => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InviteExpired,
            "Invite link has expired, please ask the academy for a new one",
        ))),
        InviteState::Used => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InviteUsed,
            "Invite link has already been used",
        ))),
    }
}

pub async fn verify_invite(
    service: &StudentAuthService,
    request: &HttpRequest,
    query: InviteTokenQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match load_valid_invite(&storage, query.token.trim()).await {
        Ok((invite, student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            InviteVerifyResponse {
                valid: true,
                student_name: student.name,
                expires_at: invite.expires_at,
            },
            "Invite is valid",
        ))),
        Err(resp) => Ok(resp),
    }
}
