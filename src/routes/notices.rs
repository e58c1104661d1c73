use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::notices::requests::{CreateNoticeRequest, UpdateNoticeRequest};
use crate::models::users::entities::UserRole;
use crate::services::NoticeService;
use crate::utils::SafeIdI64;

static NOTICE_SERVICE: Lazy<NoticeService> = Lazy::new(NoticeService::new_lazy);

pub async fn list_notices(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTICE_SERVICE.list_notices(&req).await
}

pub async fn create_notice(
    req: HttpRequest,
    body: web::Json<CreateNoticeRequest>,
) -> ActixResult<HttpResponse> {
    NOTICE_SERVICE.create_notice(&req, body.into_inner()).await
}

pub async fn get_notice(req: HttpRequest, id: SafeIdI64) -> ActixResult<HttpResponse> {
    NOTICE_SERVICE.get_notice(&req, id.0).await
}

pub async fn update_notice(
    req: HttpRequest,
    id: SafeIdI64,
    body: web::Json<UpdateNoticeRequest>,
) -> ActixResult<HttpResponse> {
    NOTICE_SERVICE
        .update_notice(&req, id.0, body.into_inner())
        .await
}

pub async fn publish_notice(req: HttpRequest, id: SafeIdI64) -> ActixResult<HttpResponse> {
    NOTICE_SERVICE.publish_notice(&req, id.0).await
}

pub async fn delete_notice(req: HttpRequest, id: SafeIdI64) -> ActixResult<HttpResponse> {
    NOTICE_SERVICE.delete_notice(&req, id.0).await
}

// 配置路由：列表与详情对教职工和学生开放
pub fn configure_notices_routes(cfg: &mut web::ServiceConfig) {
    let staff = || middlewares::RequireRole::new_any(UserRole::staff_roles());

    cfg.service(
        web::scope("/api/v1/notices")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_notices))
                    .route(web::post().to(create_notice).wrap(staff())),
            )
            .service(
                web::resource("/{id}/publish").route(web::post().to(publish_notice).wrap(staff())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_notice))
                    .route(web::put().to(update_notice).wrap(staff()))
                    .route(web::delete().to(delete_notice).wrap(staff())),
            ),
    );
}
