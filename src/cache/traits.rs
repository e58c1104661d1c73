use async_trait::async_trait;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// 后端出错，无法确定是否存在
    ExistsButNoValue,
}

impl<T> CacheResult<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            CacheResult::Found(value) => Some(value),
            _ => None,
        }
    }
}

/// 字符串键值缓存
///
/// `ttl` 为 0 时使用配置中的默认 TTL。
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    /// 读取并删除，用于一次性凭据
    async fn take_raw(&self, key: &str) -> CacheResult<String>;
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}
