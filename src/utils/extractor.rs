//! 路径参数提取器
//!
//! 路径中的 ID 必须是正整数，文件 key 只允许安全字符，否则直接返回 400。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn bad_path_param(name: &str) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid path parameter: {name}"),
    ));
    InternalError::from_response(format!("invalid path parameter {name}"), response).into()
}

fn parse_positive_id(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    req.match_info()
        .get(name)
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| bad_path_param(name))
}

macro_rules! define_safe_id_extractor {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_positive_id(req, $param).map($name))
                }
            }
        )*
    };
}

define_safe_id_extractor! {
    SafeIdI64 => "id",
    SafeStudentIdI64 => "student_id",
    SafeSubmissionIdI64 => "submission_id",
}

/// 上传文件 key，形如 `homework/<uuid>.<ext>`
#[derive(Debug, Clone)]
pub struct SafeFileKey(pub String);

/// 文件 key 只能是 目录/文件名，不能包含 `..` 或其他分隔符
pub fn is_safe_file_key(key: &str) -> bool {
    let mut parts = key.split('/');
    let (Some(dir), Some(name), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    let valid = |part: &str| {
        !part.is_empty()
            && !part.starts_with('.')
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    };
    valid(dir) && valid(name) && !name.contains("..")
}

impl FromRequest for SafeFileKey {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .match_info()
            .get("file_key")
            .filter(|key| is_safe_file_key(key))
            .map(|key| SafeFileKey(key.to_string()))
            .ok_or_else(|| bad_path_param("file_key"));
        ready(result)
    }
}

/// 功能代码
#[derive(Debug, Clone)]
pub struct SafeFeatureCode(pub String);

impl FromRequest for SafeFeatureCode {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .match_info()
            .get("code")
            .filter(|code| {
                !code.is_empty()
                    && code.len() <= 64
                    && code.chars().all(|c| c.is_ascii_lowercase() || c == '_')
            })
            .map(|code| SafeFeatureCode(code.to_string()))
            .ok_or_else(|| bad_path_param("code"));
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_safe_id_extractor() {
        let (req, mut payload) = TestRequest::default()
            .param("id", "42")
            .to_http_parts();
        let id = SafeIdI64::from_request(&req, &mut payload).await.unwrap();
        assert_eq!(id.0, 42);

        for bad in ["0", "-1", "abc"] {
            let (req, mut payload) = TestRequest::default().param("id", bad).to_http_parts();
            assert!(SafeIdI64::from_request(&req, &mut payload).await.is_err());
        }
    }

    #[test]
    fn test_safe_file_key() {
        assert!(is_safe_file_key("homework/3f2a9c1e-aaaa-bbbb-cccc-123456789abc.pdf"));
        assert!(!is_safe_file_key("homework/../config.toml"));
        assert!(!is_safe_file_key("../etc/passwd"));
        assert!(!is_safe_file_key("homework/a/b.pdf"));
        assert!(!is_safe_file_key("homework/.env"));
        assert!(!is_safe_file_key("homework"));
    }
}
