use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::students::requests::{InviteTokenQuery, OAuthCallbackQuery};
use crate::services::StudentAuthService;

// 懒加载的全局 StudentAuthService 实例
static STUDENT_AUTH_SERVICE: Lazy<StudentAuthService> = Lazy::new(StudentAuthService::new_lazy);

pub async fn verify_invite(
    req: HttpRequest,
    query: web::Query<InviteTokenQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_AUTH_SERVICE
        .verify_invite(&req, query.into_inner())
        .await
}

pub async fn kakao_login(
    req: HttpRequest,
    query: web::Query<InviteTokenQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_AUTH_SERVICE
        .kakao_login(&req, query.into_inner())
        .await
}

pub async fn kakao_login_existing(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_AUTH_SERVICE.kakao_login_existing(&req).await
}

pub async fn kakao_callback(
    req: HttpRequest,
    query: web::Query<OAuthCallbackQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_AUTH_SERVICE
        .kakao_callback(&req, query.into_inner())
        .await
}

pub async fn kakao_callback_existing(
    req: HttpRequest,
    query: web::Query<OAuthCallbackQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_AUTH_SERVICE
        .kakao_callback_existing(&req, query.into_inner())
        .await
}

// 配置路由
pub fn configure_student_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth/student")
            .route("/kakao/callback", web::get().to(kakao_callback))
            .route(
                "/kakao/callback-existing",
                web::get().to(kakao_callback_existing),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RateLimit::invite_verify())
                    .route("/invite/verify", web::get().to(verify_invite))
                    .route("/kakao/login", web::get().to(kakao_login))
                    .route("/kakao/login-existing", web::get().to(kakao_login_existing)),
            ),
    );
}
