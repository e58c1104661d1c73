use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::billing::requests::{
    BillingQueryParams, CreateBillingRequest, CreatePaymentRequest, UpdateBillingRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::BillingService;
use crate::utils::SafeIdI64;

static BILLING_SERVICE: Lazy<BillingService> = Lazy::new(BillingService::new_lazy);

pub async fn list_billings(
    req: HttpRequest,
    query: web::Query<BillingQueryParams>,
) -> ActixResult<HttpResponse> {
    BILLING_SERVICE
        .list_billings(&req, query.into_inner())
        .await
}

pub async fn create_billing(
    req: HttpRequest,
    body: web::Json<CreateBillingRequest>,
) -> ActixResult<HttpResponse> {
    BILLING_SERVICE
        .create_billing(&req, body.into_inner())
        .await
}

pub async fn get_billing(req: HttpRequest, id: SafeIdI64) -> ActixResult<HttpResponse> {
    BILLING_SERVICE.get_billing(&req, id.0).await
}

pub async fn update_billing(
    req: HttpRequest,
    id: SafeIdI64,
    body: web::Json<UpdateBillingRequest>,
) -> ActixResult<HttpResponse> {
    BILLING_SERVICE
        .update_billing(&req, id.0, body.into_inner())
        .await
}

pub async fn delete_billing(req: HttpRequest, id: SafeIdI64) -> ActixResult<HttpResponse> {
    BILLING_SERVICE.delete_billing(&req, id.0).await
}

pub async fn create_payment(
    req: HttpRequest,
    body: web::Json<CreatePaymentRequest>,
) -> ActixResult<HttpResponse> {
    BILLING_SERVICE
        .create_payment(&req, body.into_inner())
        .await
}

pub async fn list_payments(req: HttpRequest) -> ActixResult<HttpResponse> {
    BILLING_SERVICE.list_payments(&req).await
}

pub async fn get_stats(req: HttpRequest) -> ActixResult<HttpResponse> {
    BILLING_SERVICE.get_stats(&req).await
}

pub async fn get_my_billings(req: HttpRequest) -> ActixResult<HttpResponse> {
    BILLING_SERVICE.get_my_billings(&req).await
}

// 配置路由
pub fn configure_billing_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/billing")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/me").route(
                    web::get()
                        .to(get_my_billings)
                        .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                ),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .route("", web::get().to(list_billings))
                    .route("", web::post().to(create_billing))
                    .route("/payments", web::get().to(list_payments))
                    .route("/payments", web::post().to(create_payment))
                    .route("/stats", web::get().to(get_stats))
                    .route("/{id}", web::get().to(get_billing))
                    .route("/{id}", web::patch().to(update_billing))
                    .route("/{id}", web::delete().to(delete_billing)),
            ),
    );
}
