use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::ClassService;
use crate::models::{ApiResponse, classes::requests::CreateClassRequest};
use crate::services::common::{current_user, internal_error, validation_error};
use crate::storage::Storage;
use crate::utils::validate::validate_required_text;

/// 开始日期不能晚于结束日期
pub(crate) fn validate_period(
    start: Option<chrono::NaiveDate>,
    end: Option<chrono::NaiveDate>,
) -> Result<(), String> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => {
            Err("start_date must not be after end_date".to_string())
        }
        _ => Ok(()),
    }
}

/// 负责教师必须是本学院的教职工
pub(crate) async fn check_teacher(
    storage: &Arc<dyn Storage>,
    academy_id: i64,
    teacher_id: Option<i64>,
) -> Result<(), HttpResponse> {
    let Some(teacher_id) = teacher_id else {
        return Ok(());
    };
    match storage.get_user_by_id(teacher_id).await {
        Ok(Some(teacher)) if teacher.academy_id == academy_id && teacher.role.is_staff() => Ok(()),
        Ok(_) => Err(validation_error("Teacher does not exist")),
        Err(e) => Err(internal_error("Failed to verify teacher", e)),
    }
}

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    mut class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(e) = validate_required_text(&class_data.name, 100) {
        return Ok(validation_error(format!("name: {e}")));
    }
    if let Err(msg) = validate_period(class_data.start_date, class_data.end_date) {
        return Ok(validation_error(msg));
    }
    class_data.name = class_data.name.trim().to_string();

    let storage = service.get_storage(request)?;
    if let Err(resp) = check_teacher(&storage, user.academy_id, class_data.teacher_id).await {
        return Ok(resp);
    }

    match storage.create_class(user.academy_id, class_data).await {
        Ok(class) => {
            tracing::info!("Class {} created by user {}", class.id, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                class,
                "Class created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Class creation failed", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_validate_period() {
        let d = |day| NaiveDate::from_ymd_opt(2025, 3, day);
        assert!(validate_period(d(1), d(31)).is_ok());
        assert!(validate_period(d(1), d(1)).is_ok());
        assert!(validate_period(d(2), d(1)).is_err());
        assert!(validate_period(None, d(1)).is_ok());
    }
}
