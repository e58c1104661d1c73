use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::requests::{
    AttendanceDateQuery, AttendanceMonthQuery, CreateAttendanceRequest, CreateQrCodeRequest,
    QrCheckRequest, UpdateAttendanceRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AttendanceService;
use crate::utils::SafeIdI64;

static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn list_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceDateQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_attendance(&req, query.into_inner())
        .await
}

pub async fn create_attendance(
    req: HttpRequest,
    body: web::Json<CreateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .create_attendance(&req, body.into_inner())
        .await
}

pub async fn update_attendance(
    req: HttpRequest,
    id: SafeIdI64,
    body: web::Json<UpdateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .update_attendance(&req, id.0, body.into_inner())
        .await
}

pub async fn get_stats(
    req: HttpRequest,
    query: web::Query<AttendanceDateQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.get_stats(&req, query.into_inner()).await
}

pub async fn get_my_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceMonthQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .get_my_attendance(&req, query.into_inner())
        .await
}

pub async fn check_in(
    req: HttpRequest,
    body: web::Json<QrCheckRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.check_in(&req, body.into_inner()).await
}

pub async fn check_out(
    req: HttpRequest,
    body: web::Json<QrCheckRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.check_out(&req, body.into_inner()).await
}

pub async fn create_qr_code(
    req: HttpRequest,
    body: Option<web::Json<CreateQrCodeRequest>>,
) -> ActixResult<HttpResponse> {
    let data = body.map(|b| b.into_inner()).unwrap_or_default();
    ATTENDANCE_SERVICE.create_qr_code(&req, data).await
}

pub async fn list_qr_codes(req: HttpRequest) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.list_qr_codes(&req).await
}

pub async fn deactivate_qr_code(req: HttpRequest, id: SafeIdI64) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.deactivate_qr_code(&req, id.0).await
}

// 配置路由
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    let student = || middlewares::RequireRole::new_any(UserRole::student_roles());
    let staff = || middlewares::RequireRole::new_any(UserRole::staff_roles());

    cfg.service(
        web::scope("/api/v1/attendance")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_attendance).wrap(staff()))
                    .route(web::post().to(create_attendance).wrap(staff())),
            )
            .service(web::resource("/stats").route(web::get().to(get_stats).wrap(staff())))
            // 学生本人出勤与扫码签到
            .service(web::resource("/me").route(web::get().to(get_my_attendance).wrap(student())))
            .service(web::resource("/check-in").route(web::post().to(check_in).wrap(student())))
            .service(
                web::resource("/check-out").route(web::post().to(check_out).wrap(student())),
            )
            .service(
                web::resource("/qr-codes")
                    .route(web::get().to(list_qr_codes).wrap(staff()))
                    .route(web::post().to(create_qr_code).wrap(staff())),
            )
            .service(
                web::resource("/qr-codes/{id}")
                    .route(web::delete().to(deactivate_qr_code).wrap(staff())),
            )
            .service(
                web::resource("/{id}").route(web::patch().to(update_attendance).wrap(staff())),
            ),
    );
}
