use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::classes::requests::{
    AddClassStudentsRequest, CreateClassRequest, UpdateClassRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ClassService;
use crate::utils::{SafeIdI64, SafeStudentIdI64};

// 懒加载的全局 CLASS_SERVICE 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

pub async fn list_classes(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req).await
}

pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(&req, class_data.into_inner())
        .await
}

pub async fn get_class(req: HttpRequest, class_id: SafeIdI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class(&req, class_id.0).await
}

pub async fn update_class(
    req: HttpRequest,
    class_id: SafeIdI64,
    update_data: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .update_class(&req, class_id.0, update_data.into_inner())
        .await
}

pub async fn delete_class(req: HttpRequest, class_id: SafeIdI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(&req, class_id.0).await
}

pub async fn add_student(
    req: HttpRequest,
    class_id: SafeIdI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .add_students(&req, class_id.0, vec![student_id.0])
        .await
}

pub async fn add_students(
    req: HttpRequest,
    class_id: SafeIdI64,
    body: web::Json<AddClassStudentsRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .add_students(&req, class_id.0, body.into_inner().student_ids)
        .await
}

pub async fn remove_student(
    req: HttpRequest,
    class_id: SafeIdI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .remove_student(&req, class_id.0, student_id.0)
        .await
}

// 配置路由，仅教职工
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_classes))
                    .route(web::post().to(create_class)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_class))
                    .route(web::put().to(update_class))
                    .route(web::delete().to(delete_class)),
            )
            .service(web::resource("/{id}/students").route(web::post().to(add_students)))
            .service(
                web::resource("/{id}/students/{student_id}")
                    .route(web::post().to(add_student))
                    .route(web::delete().to(remove_student)),
            ),
    );
}
