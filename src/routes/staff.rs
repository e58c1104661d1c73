use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateStaffRequest;
use crate::services::StaffService;

static STAFF_SERVICE: Lazy<StaffService> = Lazy::new(StaffService::new_lazy);

pub async fn list_staff(req: HttpRequest) -> ActixResult<HttpResponse> {
    STAFF_SERVICE.list_staff(&req).await
}

pub async fn create_staff(
    req: HttpRequest,
    staff_data: web::Json<CreateStaffRequest>,
) -> ActixResult<HttpResponse> {
    STAFF_SERVICE
        .create_staff(&req, staff_data.into_inner())
        .await
}

// 配置路由，仅管理员
pub fn configure_staff_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/staff")
            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_staff))
            .route("", web::post().to(create_staff)),
    );
}
