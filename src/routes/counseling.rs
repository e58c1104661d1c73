use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::counseling::{
    CounselingQueryParams, CreateCounselingRequest, UpdateCounselingRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::CounselingService;
use crate::utils::SafeIdI64;

static COUNSELING_SERVICE: Lazy<CounselingService> = Lazy::new(CounselingService::new_lazy);

pub async fn list_counseling(
    req: HttpRequest,
    query: web::Query<CounselingQueryParams>,
) -> ActixResult<HttpResponse> {
    COUNSELING_SERVICE
        .list_counseling(&req, query.into_inner())
        .await
}

pub async fn create_counseling(
    req: HttpRequest,
    body: web::Json<CreateCounselingRequest>,
) -> ActixResult<HttpResponse> {
    COUNSELING_SERVICE
        .create_counseling(&req, body.into_inner())
        .await
}

pub async fn get_counseling(req: HttpRequest, id: SafeIdI64) -> ActixResult<HttpResponse> {
    COUNSELING_SERVICE.get_counseling(&req, id.0).await
}

pub async fn update_counseling(
    req: HttpRequest,
    id: SafeIdI64,
    body: web::Json<UpdateCounselingRequest>,
) -> ActixResult<HttpResponse> {
    COUNSELING_SERVICE
        .update_counseling(&req, id.0, body.into_inner())
        .await
}

pub async fn delete_counseling(req: HttpRequest, id: SafeIdI64) -> ActixResult<HttpResponse> {
    COUNSELING_SERVICE.delete_counseling(&req, id.0).await
}

// 配置路由，仅教职工
pub fn configure_counseling_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/counseling")
            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_counseling))
                    .route(web::post().to(create_counseling)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_counseling))
                    .route(web::put().to(update_counseling))
                    .route(web::delete().to(delete_counseling)),
            ),
    );
}
