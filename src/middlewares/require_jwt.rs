/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <access token>`，解析出当前主体（教职工或已绑定的学生），
 * 以 `CurrentUser` 的形式放入请求扩展。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireJWT;
 *
 * App::new().service(
 *     web::scope("/api/v1/students")
 *         .wrap(RequireJWT)
 *         .route("/me", web::get().to(my_profile)),
 * );
 *
 * async fn my_profile(req: HttpRequest) -> ActixResult<HttpResponse> {
 *     let user = RequireJWT::extract_current_user(&req);
 *     // ...
 * }
 * ```
 *
 * ## 认证流程
 *
 * 1. 校验签名、过期时间与 token 类型（必须为 access）
 * 2. 按 `principal:{role}:{id}` 查询缓存，缓存的主体须与 token 的学院一致
 * 3. 缓存未命中时读取存储：教职工要求账号为 active，学生要求已绑定且为 active
 * 4. 主体的 `academy_id` 必须与 token 中的一致
 *
 * 主体状态变化（停用学生等）后需调用 `RequireJWT::forget_principal`。
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::auth::entities::CurrentUser;
use crate::models::students::entities::StudentStatus;
use crate::models::users::entities::{UserRole, UserStatus};
use crate::storage::Storage;
use crate::utils::jwt::{Claims, JwtUtils};
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info, warn};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireJWT;

fn principal_cache_key(role: UserRole, id: i64) -> String {
    format!("principal:{role}:{id}")
}

/// 根据 claims 从存储中加载主体
async fn load_principal(storage: &Arc<dyn Storage>, claims: &Claims) -> Result<CurrentUser, String> {
    let subject = claims
        .subject()
        .ok_or_else(|| "Invalid token subject".to_string())?;

    match subject.role {
        UserRole::Admin | UserRole::Teacher => {
            let user = storage
                .get_user_by_id(subject.id)
                .await
                .map_err(|e| {
                    warn!("Failed to load user {}: {}", subject.id, e);
                    "Failed to retrieve user".to_string()
                })?
                .ok_or_else(|| "User not found".to_string())?;

            if user.status != UserStatus::Active {
                return Err("User is not active".to_string());
            }
            if user.academy_id != subject.academy_id {
                return Err("Academy mismatch".to_string());
            }

            Ok(CurrentUser {
                id: user.id,
                academy_id: user.academy_id,
                role: user.role,
                name: user.name,
                email: Some(user.email),
                user_account_id: None,
            })
        }
        UserRole::Student => {
            let student = storage
                .get_student(subject.academy_id, subject.id)
                .await
                .map_err(|e| {
                    warn!("Failed to load student {}: {}", subject.id, e);
                    "Failed to retrieve student".to_string()
                })?
                .ok_or_else(|| "Student not found".to_string())?;

            if !student.is_linked || student.status != StudentStatus::Active {
                return Err("Student is not linked".to_string());
            }

            Ok(CurrentUser {
                id: student.id,
                academy_id: student.academy_id,
                role: UserRole::Student,
                name: student.name,
                email: student.email,
                user_account_id: subject.user_account_id,
            })
        }
    }
}

// 提取并验证 access token，返回当前主体
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<CurrentUser, String> {
    let token = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| "Cache not configured".to_string())?;

    let subject = claims
        .subject()
        .ok_or_else(|| "Invalid token subject".to_string())?;
    let cache_key = principal_cache_key(subject.role, subject.id);
    match cache.get_raw(&cache_key).await {
        CacheResult::Found(json) => match serde_json::from_str::<CurrentUser>(&json) {
            Ok(user) if user.academy_id == subject.academy_id => {
                return Ok(CurrentUser {
                    user_account_id: subject.user_account_id.or(user.user_account_id),
                    ..user
                });
            }
            Ok(_) => debug!("Cached principal belongs to another academy, reloading"),
            Err(_) => {
                cache.remove(&cache_key).await;
                debug!("Dropped malformed principal cache entry");
            }
        },
        _ => debug!("Principal not cached, loading from storage"),
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| "Storage not configured".to_string())?;

    let user = load_principal(&storage, &claims).await?;

    if let Ok(user_json) = serde_json::to_string(&user) {
        cache
            .insert_raw(cache_key, user_json, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!(
                        "JWT authentication successful for {} {} (academy {})",
                        user.role, user.id, user.academy_id
                    );
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 从请求扩展中取出当前主体，需在 RequireJWT 之后调用
    pub fn extract_current_user(req: &actix_web::HttpRequest) -> Option<CurrentUser> {
        req.extensions().get::<CurrentUser>().cloned()
    }

    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<CurrentUser>().map(|user| user.id)
    }

    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<UserRole> {
        req.extensions().get::<CurrentUser>().map(|user| user.role)
    }

    /// 清除主体缓存，下次请求重新从存储读取并校验状态
    pub async fn forget_principal(cache: &Arc<dyn ObjectCache>, role: UserRole, id: i64) {
        cache.remove(&principal_cache_key(role, id)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::models::students::entities::ProviderProfile;
    use crate::models::users::requests::CreateUser;
    use crate::services::StudentService;
    use crate::storage::sea_orm_storage::test_support::{
        memory_storage, seed_academy, seed_student,
    };
    use crate::utils::jwt::TokenSubject;
    use actix_web::{App, HttpRequest, HttpResponse, test as actix_test};

    async fn whoami(req: HttpRequest) -> HttpResponse {
        match RequireJWT::extract_current_user(&req) {
            Some(user) => HttpResponse::Ok().json(user.id),
            None => HttpResponse::Unauthorized().finish(),
        }
    }

    async fn delete_student(
        req: HttpRequest,
        path: web::Path<i64>,
    ) -> actix_web::Result<HttpResponse> {
        StudentService::new_lazy()
            .delete_student(&req, path.into_inner())
            .await
    }

    fn bearer(subject: &TokenSubject) -> (actix_web::http::header::HeaderName, String) {
        let token = JwtUtils::generate_access_token(subject).unwrap();
        (actix_web::http::header::AUTHORIZATION, format!("{BEARER_PREFIX}{token}"))
    }

    #[actix_web::test]
    async fn test_deactivated_student_loses_access_immediately() {
        let seeded = memory_storage().await;
        let academy_id = seed_academy(&seeded, "SEOUL").await;
        let student = seed_student(&seeded, academy_id, "김민준").await;
        let storage: Arc<dyn Storage> = Arc::new(seeded);
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(100, 600));

        let admin = storage
            .create_user(CreateUser {
                academy_id,
                email: "admin@seoul.test".to_string(),
                password_hash: "unused".to_string(),
                name: "원장".to_string(),
                role: UserRole::Admin,
            })
            .await
            .unwrap();
        let expires_at = chrono::Utc::now().timestamp() + 3600;
        storage
            .replace_student_invite(student.id, "link-token", expires_at)
            .await
            .unwrap();
        let account = storage
            .upsert_user_account(ProviderProfile {
                provider: "KAKAO".to_string(),
                provider_user_id: "2001".to_string(),
                email: None,
                name: None,
            })
            .await
            .unwrap();
        storage.redeem_invite("link-token", account.id).await.unwrap();

        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .app_data(web::Data::new(cache.clone()))
                .service(
                    web::scope("")
                        .wrap(RequireJWT)
                        .route("/whoami", web::get().to(whoami))
                        .route("/students/{id}", web::delete().to(delete_student)),
                ),
        )
        .await;

        let student_auth = bearer(&TokenSubject {
            id: student.id,
            role: UserRole::Student,
            academy_id,
            user_account_id: Some(account.id),
        });
        let admin_auth = bearer(&TokenSubject {
            id: admin.id,
            role: UserRole::Admin,
            academy_id,
            user_account_id: None,
        });
        let whoami_request = || {
            actix_test::TestRequest::get()
                .uri("/whoami")
                .insert_header(student_auth.clone())
                .to_request()
        };

        // 第一次请求后主体进入缓存
        let resp = actix_test::call_service(&app, whoami_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/students/{}", student.id))
                .insert_header(admin_auth)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = actix_test::call_service(&app, whoami_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_forget_principal_removes_cached_entry() {
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(100, 600));
        let user = CurrentUser {
            id: 7,
            academy_id: 3,
            role: UserRole::Teacher,
            name: "박선생".to_string(),
            email: None,
            user_account_id: None,
        };
        let key = principal_cache_key(UserRole::Teacher, 7);
        assert_eq!(key, "principal:teacher:7");
        cache
            .insert_raw(key.clone(), serde_json::to_string(&user).unwrap(), 600)
            .await;

        RequireJWT::forget_principal(&cache, UserRole::Teacher, 7).await;
        assert!(!matches!(cache.get_raw(&key).await, CacheResult::Found(_)));
    }
}
