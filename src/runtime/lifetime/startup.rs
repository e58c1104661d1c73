use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::errors::AcademyError;
use crate::models::academies::{Academy, CreateAcademy};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUser;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_token;
use std::sync::Arc;
use tracing::{debug, info, warn};

const DEFAULT_ACADEMY_CODE: &str = "DEFAULT";
const DEFAULT_ADMIN_EMAIL: &str = "admin@academy.local";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

async fn try_cache_backend(name: &str) -> Option<Arc<dyn ObjectCache>> {
    let constructor = match get_object_cache_plugin(name) {
        Some(constructor) => constructor,
        None => {
            warn!("Cache backend '{}' not found in registry", name);
            return None;
        }
    };
    match constructor().await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", name);
            Some(Arc::from(cache))
        }
        Err(e) => {
            warn!("Failed to create {} cache: {}", name, e);
            None
        }
    }
}

/// 创建缓存实例，配置的后端不可用时回退到 moka
async fn create_cache() -> Result<Arc<dyn ObjectCache>, AcademyError> {
    let cache_type = &AppConfig::get().cache.cache_type;
    warn!("Attempting to create {} cache backend", cache_type);

    if let Some(cache) = try_cache_backend(cache_type).await {
        return Ok(cache);
    }
    if cache_type != "moka" {
        warn!("Falling back to memory cache");
        if let Some(cache) = try_cache_backend("moka").await {
            return Ok(cache);
        }
    }

    Err(AcademyError::cache_connection(format!(
        "No cache backend available (tried: {cache_type})"
    )))
}

/// 确保默认学院存在
async fn ensure_default_academy(storage: &Arc<dyn Storage>) -> Result<Academy, AcademyError> {
    if let Some(academy) = storage.get_academy_by_code(DEFAULT_ACADEMY_CODE).await? {
        debug!("Default academy already exists (ID: {})", academy.id);
        return Ok(academy);
    }

    let academy = storage
        .create_academy(CreateAcademy {
            name: AppConfig::get().app.system_name.clone(),
            code: DEFAULT_ACADEMY_CODE.to_string(),
            owner_name: None,
            contact_email: None,
        })
        .await?;
    info!("Default academy created (ID: {})", academy.id);
    Ok(academy)
}

/// 初始化默认管理员账号
///
/// 邮箱取 `ADMIN_EMAIL`，密码取 `ADMIN_PASSWORD`，未设置时生成随机密码并打印。
async fn seed_admin(storage: &Arc<dyn Storage>, academy: &Academy) -> Result<(), AcademyError> {
    let email = std::env::var("ADMIN_EMAIL")
        .unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string())
        .trim()
        .to_lowercase();

    if storage.get_user_by_email(&email).await?.is_some() {
        debug!("Admin account {} already exists, skipping seed", email);
        return Ok(());
    }

    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_token(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Admin email: {}", email);
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let user = storage
        .create_user(CreateUser {
            academy_id: academy.id,
            email,
            password_hash: hash_password(&password)?,
            name: "Administrator".to_string(),
            role: UserRole::Admin,
        })
        .await?;
    info!(
        "Default admin account created (ID: {}, email: {})",
        user.id, user.email
    );
    Ok(())
}

/// 准备服务器启动的上下文：存储、初始数据、上传目录与缓存
pub async fn prepare_server_startup() -> Result<StartupContext, AcademyError> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| AcademyError::startup("Failed to install rustls crypto provider"))?;

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    let academy = ensure_default_academy(&storage).await?;
    if let Err(e) = seed_admin(&storage, &academy).await {
        warn!("Failed to seed admin account: {}", e);
    }

    let upload_dir = &AppConfig::get().upload.dir;
    tokio::fs::create_dir_all(upload_dir).await?;
    debug!("Upload directory ready: {}", upload_dir);

    let cache = create_cache().await?;
    warn!("Cache backend initialized");

    Ok(StartupContext { storage, cache })
}
