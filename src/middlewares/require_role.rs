/*!
 * 基于角色的访问控制中间件
 *
 * 此中间件必须在 RequireJWT 中间件之后使用，用于验证用户是否具有特定角色权限。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App, HttpServer};
 * use crate::middlewares::require_jwt::RequireJWT;
 * use crate::middlewares::require_role::RequireRole;
 * use crate::models::users::entities::UserRole;
 *
 * HttpServer::new(|| {
 *     App::new()
 *         .service(
 *             web::scope("/api")
 *                 .wrap(RequireJWT)  // 先验证JWT
 *                 .service(
 *                     web::scope("/admin")
 *                         .wrap(RequireRole::new(&UserRole::Admin))  // 再验证角色
 *                         .route("/staff", web::get().to(list_staff))
 *                 )
 *         )
 * })
 * ```
 *
 * 或者验证多个角色：
 *
 * ```rust,ignore
 * .wrap(RequireRole::new_any(UserRole::staff_roles()))  // 管理员或教师
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{ErrorCode, auth::entities::CurrentUser, users::entities::UserRole};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    required_roles: Vec<UserRole>,
    require_all: bool, // true表示需要所有角色，false表示任一角色即可
}

impl RequireRole {
    /// 创建需要特定角色的中间件
    pub fn new(role: &UserRole) -> Self {
        Self {
            required_roles: vec![*role],
            require_all: true,
        }
    }

    /// 创建需要任一角色的中间件
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            required_roles: roles.iter().map(|r| **r).collect(),
            require_all: false,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            required_roles: self.required_roles.clone(),
            require_all: self.require_all,
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    required_roles: Vec<UserRole>,
    require_all: bool,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let required_roles = self.required_roles.clone();
        let require_all = self.require_all;

        Box::pin(async move {
            let current_user = req.extensions().get::<CurrentUser>().cloned();

            match current_user {
                Some(user) => {
                    let has_permission = if require_all {
                        required_roles.iter().all(|role| *role == user.role)
                    } else {
                        required_roles.contains(&user.role)
                    };

                    if has_permission {
                        let res = srv.call(req).await?.map_into_left_body();
                        Ok(res)
                    } else {
                        info!(
                            "Access denied for {} {} (academy {}). Required roles: {:?}",
                            user.role, user.id, user.academy_id, required_roles
                        );
                        Ok(req.into_response(
                            create_error_response(
                                StatusCode::FORBIDDEN,
                                ErrorCode::Forbidden,
                                "Access denied.",
                            )
                            .map_into_right_body(),
                        ))
                    }
                }
                None => {
                    info!(
                        "Role check failed: no principal in request, RequireJWT must run first"
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, dev::Service as _, test, web};

    fn principal(role: UserRole) -> CurrentUser {
        CurrentUser {
            id: 1,
            academy_id: 1,
            role,
            name: "Tester".to_string(),
            email: None,
            user_account_id: None,
        }
    }

    async fn status_for(role: Option<UserRole>, gate: RequireRole) -> StatusCode {
        let app = test::init_service(
            App::new()
                .wrap(gate)
                .wrap_fn(move |req, srv| {
                    if let Some(role) = role {
                        req.extensions_mut().insert(principal(role));
                    }
                    srv.call(req)
                })
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        resp.status()
    }

    #[actix_web::test]
    async fn test_staff_gate() {
        let gate = || RequireRole::new_any(UserRole::staff_roles());
        assert_eq!(status_for(Some(UserRole::Teacher), gate()).await, StatusCode::OK);
        assert_eq!(status_for(Some(UserRole::Admin), gate()).await, StatusCode::OK);
        assert_eq!(status_for(Some(UserRole::Student), gate()).await, StatusCode::FORBIDDEN);
        assert_eq!(status_for(None, gate()).await, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_admin_gate() {
        let gate = || RequireRole::new(&UserRole::Admin);
        assert_eq!(status_for(Some(UserRole::Admin), gate()).await, StatusCode::OK);
        assert_eq!(status_for(Some(UserRole::Teacher), gate()).await, StatusCode::FORBIDDEN);
    }
}
