use crate::config::AppConfig;
use crate::models::users::entities::UserRole;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN: &str = "access";
pub const REFRESH_TOKEN: &str = "refresh";
pub const REFRESH_COOKIE_NAME: &str = "refresh_token";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // users.id 或 students.id，取决于 role
    pub role: String,
    pub academy_id: i64,
    // 学生通过 Kakao 登录时的 user_accounts.id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_account_id: Option<i64>,
    pub token_type: String, // "access" 或 "refresh"
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn subject_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }

    pub fn user_role(&self) -> Option<UserRole> {
        self.role.parse().ok()
    }

    pub fn subject(&self) -> Option<TokenSubject> {
        Some(TokenSubject {
            id: self.subject_id()?,
            role: self.user_role()?,
            academy_id: self.academy_id,
            user_account_id: self.user_account_id,
        })
    }
}

/// 令牌携带的身份
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub id: i64,
    pub role: UserRole,
    pub academy_id: i64,
    pub user_account_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    /// access token 有效期（秒）
    pub fn access_token_ttl_seconds() -> i64 {
        AppConfig::get().jwt.access_token_expiry * 60
    }

    pub fn generate_access_token(
        subject: &TokenSubject,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        Self::generate_token_with_expiry(
            subject,
            ACCESS_TOKEN,
            chrono::Duration::minutes(config.jwt.access_token_expiry),
        )
    }

    pub fn generate_refresh_token(
        subject: &TokenSubject,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        Self::generate_token_with_expiry(
            subject,
            REFRESH_TOKEN,
            chrono::Duration::days(config.jwt.refresh_token_expiry),
        )
    }

    pub fn generate_token_with_expiry(
        subject: &TokenSubject,
        token_type: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: subject.id.to_string(),
            role: subject.role.to_string(),
            academy_id: subject.academy_id,
            user_account_id: subject.user_account_id,
            token_type: token_type.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let secret = Self::get_secret();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
    }

    pub fn generate_token_pair(
        subject: &TokenSubject,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair {
            access_token: Self::generate_access_token(subject)?,
            refresh_token: Self::generate_refresh_token(subject)?,
        })
    }

    pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let secret = Self::get_secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<Claims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)
    }

    pub fn verify_token_type(
        token: &str,
        expected_type: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = Self::verify_token(token)?;
        if claims.token_type != expected_type {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }
        Ok(claims)
    }

    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_token_type(token, ACCESS_TOKEN)
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_token_type(token, REFRESH_TOKEN)
    }

    /// 使用 Refresh Token 生成新的 Access Token，身份沿用原 claims
    pub fn refresh_access_token(
        refresh_token: &str,
    ) -> Result<(String, TokenSubject), jsonwebtoken::errors::Error> {
        let claims = Self::verify_refresh_token(refresh_token)?;
        let subject = claims
            .subject()
            .ok_or(jsonwebtoken::errors::ErrorKind::InvalidToken)?;
        let token = Self::generate_access_token(&subject)?;
        Ok((token, subject))
    }

    /// 创建 Refresh Token Cookie
    ///
    /// 学生从 Kakao 回调跳转回前端，SameSite=Strict 会丢失 cookie，所以使用 Lax。
    pub fn create_refresh_token_cookie(refresh_token: &str) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_COOKIE_NAME, refresh_token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::days(
                config.jwt.refresh_token_expiry,
            ))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 创建空的 Refresh Token Cookie（用于注销）
    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_COOKIE_NAME, "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE_NAME)
            .map(|cookie| cookie.value().to_string())
    }

    /// 从 Authorization 头中提取 Bearer token
    pub fn extract_bearer_token(req: &actix_web::HttpRequest) -> Option<String> {
        req.headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student_subject() -> TokenSubject {
        TokenSubject {
            id: 42,
            role: UserRole::Student,
            academy_id: 3,
            user_account_id: Some(7),
        }
    }

    #[test]
    fn test_access_token_roundtrip() {
        let token = JwtUtils::generate_access_token(&student_subject()).unwrap();
        let claims = JwtUtils::verify_access_token(&token).unwrap();
        assert_eq!(claims.subject(), Some(student_subject()));
        assert_eq!(claims.token_type, ACCESS_TOKEN);
    }

    #[test]
    fn test_token_type_mismatch() {
        let pair = JwtUtils::generate_token_pair(&student_subject()).unwrap();
        assert!(JwtUtils::verify_refresh_token(&pair.access_token).is_err());
        assert!(JwtUtils::verify_access_token(&pair.refresh_token).is_err());
    }

    #[test]
    fn test_refresh_keeps_identity() {
        let subject = TokenSubject {
            id: 1,
            role: UserRole::Admin,
            academy_id: 1,
            user_account_id: None,
        };
        let refresh = JwtUtils::generate_refresh_token(&subject).unwrap();
        let (access, refreshed) = JwtUtils::refresh_access_token(&refresh).unwrap();
        assert_eq!(refreshed, subject);
        assert!(JwtUtils::verify_access_token(&access).is_ok());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = JwtUtils::generate_token_with_expiry(
            &student_subject(),
            ACCESS_TOKEN,
            chrono::Duration::minutes(-10),
        )
        .unwrap();
        assert!(JwtUtils::verify_access_token(&token).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let mut token = JwtUtils::generate_access_token(&student_subject()).unwrap();
        token.push('x');
        assert!(JwtUtils::verify_token(&token).is_err());
    }
}
