use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::academies::UpdateAcademyRequest;
use crate::models::users::entities::UserRole;
use crate::services::AcademyService;

static ACADEMY_SERVICE: Lazy<AcademyService> = Lazy::new(AcademyService::new_lazy);

pub async fn get_academy(req: HttpRequest) -> ActixResult<HttpResponse> {
    ACADEMY_SERVICE.get_academy(&req).await
}

pub async fn update_academy(
    req: HttpRequest,
    update: web::Json<UpdateAcademyRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMY_SERVICE
        .update_academy(&req, update.into_inner())
        .await
}

// 配置路由
pub fn configure_academy_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/academy")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(get_academy)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::put()
                            .to(update_academy)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                    ),
            ),
    );
}
