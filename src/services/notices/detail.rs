use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NoticeService;
use crate::models::{ApiResponse, ErrorCode, notices::entities::NoticeStatus};
use crate::services::common::{current_user, internal_error, not_found};

pub async fn get_notice(
    service: &NoticeService,
    request: &HttpRequest,
    notice_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    let mut detail = match storage.get_notice_detail(user.academy_id, notice_id).await {
        Ok(Some(detail)) => detail,
        Ok(None) => return Ok(not_found(ErrorCode::NoticeNotFound, "Notice not found")),
        Err(e) => return Ok(internal_error("Failed to get notice", e)),
    };

    if !user.is_staff() {
        // 学生只能读取面向自己班级的已发布公告
        if detail.notice.status != NoticeStatus::Published {
            return Ok(not_found(ErrorCode::NoticeNotFound, "Notice not found"));
        }
        match storage.is_notice_visible_to_student(notice_id, user.id).await {
            Ok(true) => {}
            Ok(false) => return Ok(not_found(ErrorCode::NoticeNotFound, "Notice not found")),
            Err(e) => return Ok(internal_error("Failed to get notice", e)),
        }
        match storage.increment_notice_views(notice_id).await {
            Ok(()) => detail.notice.view_count += 1,
            Err(e) => tracing::warn!("Failed to count view of notice {}: {}", notice_id, e),
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        detail,
        "Notice retrieved successfully",
    )))
}
