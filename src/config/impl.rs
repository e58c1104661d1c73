use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("ACADEMY")
                    .separator("_")
                    .try_parsing(true),
            );

        // 支持从环境变量加载
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("cache.redis.url", std::env::var("REDIS_URL").ok())?
            .set_override_option(
                "cache.redis.key_prefix",
                std::env::var("REDIS_KEY_PREFIX").ok(),
            )?
            .set_override_option("cache.default_ttl", std::env::var("CACHE_TTL").ok())?
            .set_override_option("app.frontend_url", std::env::var("FRONTEND_URL").ok())?
            .set_override_option("kakao.client_id", std::env::var("KAKAO_CLIENT_ID").ok())?
            .set_override_option(
                "kakao.client_secret",
                std::env::var("KAKAO_CLIENT_SECRET").ok(),
            )?
            .set_override_option(
                "kakao.redirect_base_url",
                std::env::var("KAKAO_REDIRECT_BASE_URL").ok(),
            )?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 前端地址（去掉末尾的斜杠）
    pub fn frontend_base(&self) -> &str {
        self.app.frontend_url.trim_end_matches('/')
    }

    /// Kakao 回调地址，`path` 以 `/` 开头
    pub fn kakao_redirect_uri(&self, path: &str) -> String {
        let base = self.kakao.redirect_base_url.trim_end_matches('/');
        let base = if base.is_empty() { self.frontend_base() } else { base };
        format!("{base}{path}")
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_file() {
        let config = AppConfig::default();
        assert!(config.is_development());
        assert_eq!(config.invite.expiry_days, 7);
        assert_eq!(config.jwt.access_token_expiry, 30);
        assert_eq!(config.server_bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_frontend_base_trims_slash() {
        let mut config = AppConfig::default();
        config.app.frontend_url = "https://academy.example.com/".to_string();
        assert_eq!(config.frontend_base(), "https://academy.example.com");
    }

    #[test]
    fn test_kakao_redirect_uri_falls_back_to_frontend() {
        let mut config = AppConfig::default();
        config.app.frontend_url = "https://academy.example.com/".to_string();
        assert_eq!(
            config.kakao_redirect_uri("/api/v1/auth/student/kakao/callback"),
            "https://academy.example.com/api/v1/auth/student/kakao/callback"
        );

        config.kakao.redirect_base_url = "https://api.example.com".to_string();
        assert_eq!(
            config.kakao_redirect_uri("/cb"),
            "https://api.example.com/cb"
        );
    }
}
