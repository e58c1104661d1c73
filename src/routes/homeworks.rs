use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::homeworks::requests::{
    CreateHomeworkRequest, GradeSubmissionRequest, PresignUploadRequest, SubmitHomeworkRequest,
    UpdateHomeworkRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::HomeworkService;
use crate::utils::{SafeFileKey, SafeIdI64, SafeSubmissionIdI64};

// 懒加载的全局 HomeworkService 实例
static HOMEWORK_SERVICE: Lazy<HomeworkService> = Lazy::new(HomeworkService::new_lazy);

pub async fn list_homeworks(req: HttpRequest) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE.list_homeworks(&req).await
}

pub async fn create_homework(
    req: HttpRequest,
    body: web::Json<CreateHomeworkRequest>,
) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE
        .create_homework(&req, body.into_inner())
        .await
}

pub async fn get_homework(req: HttpRequest, id: SafeIdI64) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE.get_homework(&req, id.0).await
}

pub async fn update_homework(
    req: HttpRequest,
    id: SafeIdI64,
    body: web::Json<UpdateHomeworkRequest>,
) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE
        .update_homework(&req, id.0, body.into_inner())
        .await
}

pub async fn delete_homework(req: HttpRequest, id: SafeIdI64) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE.delete_homework(&req, id.0).await
}

pub async fn list_submissions(req: HttpRequest, id: SafeIdI64) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE.list_submissions(&req, id.0).await
}

pub async fn grade_submission(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
    body: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE
        .grade_submission(&req, submission_id.0, body.into_inner())
        .await
}

pub async fn list_my_homeworks(req: HttpRequest) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE.list_my_homeworks(&req).await
}

pub async fn submit_homework(
    req: HttpRequest,
    id: SafeIdI64,
    body: web::Json<SubmitHomeworkRequest>,
) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE
        .submit_homework(&req, id.0, body.into_inner())
        .await
}

pub async fn presign_upload(
    req: HttpRequest,
    body: web::Json<PresignUploadRequest>,
) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE
        .presign_upload(&req, body.into_inner())
        .await
}

pub async fn upload_file(
    req: HttpRequest,
    file_key: SafeFileKey,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE
        .upload_file(&req, file_key.0, payload)
        .await
}

pub async fn serve_upload(file_key: SafeFileKey) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE.serve_file(file_key.0).await
}

// 配置路由
pub fn configure_homeworks_routes(cfg: &mut web::ServiceConfig) {
    let student = || middlewares::RequireRole::new_any(UserRole::student_roles());
    let staff = || middlewares::RequireRole::new_any(UserRole::staff_roles());

    cfg.service(
        web::scope("/api/v1/homeworks")
            .wrap(middlewares::RequireJWT)
            // 学生端
            .service(web::resource("/my").route(web::get().to(list_my_homeworks).wrap(student())))
            .service(
                web::resource("/{id}/submit")
                    .route(web::post().to(submit_homework).wrap(student())),
            )
            // 上传：教职工与学生均可
            .service(
                web::scope("/uploads")
                    .wrap(middlewares::RateLimit::file_upload())
                    .route("/presign", web::post().to(presign_upload))
                    .route("/file/{file_key:.*}", web::post().to(upload_file)),
            )
            .service(
                web::resource("/submissions/{submission_id}/grade")
                    .route(web::put().to(grade_submission).wrap(staff())),
            )
            .service(
                web::resource("")
                    .route(web::get().to(list_homeworks).wrap(staff()))
                    .route(web::post().to(create_homework).wrap(staff())),
            )
            .service(
                web::resource("/{id}/submissions")
                    .route(web::get().to(list_submissions).wrap(staff())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_homework).wrap(staff()))
                    .route(web::put().to(update_homework).wrap(staff()))
                    .route(web::delete().to(delete_homework).wrap(staff())),
            ),
    );
}

// 已上传文件的公开访问路径
pub fn configure_upload_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/uploads/{file_key:.*}", web::get().to(serve_upload));
}
