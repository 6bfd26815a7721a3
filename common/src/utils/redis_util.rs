use crate::error::AppError;
use deadpool_redis::{redis::cmd, Config, Connection, Pool, Runtime};

/// Redis 工具类 - 封装 deadpool-redis 连接池
///
/// 只暴露账本子系统需要的命令子集
#[derive(Clone)]
pub struct RedisUtil {
    pool: Pool,
}

impl RedisUtil {
    /// 从 URL 创建 Redis 连接池
    pub fn from_url(url: &str) -> Result<Self, AppError> {
        let cfg = Config::from_url(url);

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| AppError::RedisError(format!("创建 Redis 连接池失败: {}", e)))?;

        log::info!("✅ Redis 连接池初始化成功");

        Ok(RedisUtil { pool })
    }

    async fn conn(&self) -> Result<Connection, AppError> {
        self.pool
            .get()
            .await
            .map_err(|e| AppError::RedisError(format!("获取 Redis 连接失败: {}", e)))
    }

    /// SET - 设置键值
    pub async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut conn = self.conn().await?;
        cmd("SET")
            .arg(&[key, value])
            .query_async::<()>(&mut conn)
            .await?;
        Ok(())
    }

    /// SETEX - 设置带过期时间的键值 (秒)
    pub async fn set_ex(&self, key: &str, value: &str, seconds: i64) -> Result<(), AppError> {
        let mut conn = self.conn().await?;
        cmd("SETEX")
            .arg(&[key, &seconds.to_string(), value])
            .query_async::<()>(&mut conn)
            .await?;
        Ok(())
    }

    /// SET NX EX - 键不存在时设置并带过期时间 (分布式锁)
    ///
    /// 返回 true 表示设置成功
    pub async fn set_nx(&self, key: &str, value: &str, expire_seconds: i64) -> Result<bool, AppError> {
        let mut conn = self.conn().await?;
        let result: Option<String> = cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("EX")
            .arg(expire_seconds)
            .query_async(&mut conn)
            .await?;
        Ok(result.is_some())
    }

    /// GET - 获取值
    pub async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let mut conn = self.conn().await?;
        let value: Option<String> = cmd("GET").arg(&[key]).query_async(&mut conn).await?;
        Ok(value)
    }

    /// DEL - 删除键
    pub async fn del(&self, key: &str) -> Result<bool, AppError> {
        let mut conn = self.conn().await?;
        let deleted: i32 = cmd("DEL").arg(&[key]).query_async(&mut conn).await?;
        Ok(deleted > 0)
    }

    /// EXISTS - 检查键是否存在
    pub async fn exists(&self, key: &str) -> Result<bool, AppError> {
        let mut conn = self.conn().await?;
        let exists: i32 = cmd("EXISTS").arg(&[key]).query_async(&mut conn).await?;
        Ok(exists > 0)
    }

    /// EXPIRE - 设置过期时间 (秒)
    pub async fn expire(&self, key: &str, seconds: i64) -> Result<bool, AppError> {
        let mut conn = self.conn().await?;
        let set: i32 = cmd("EXPIRE")
            .arg(&[key, &seconds.to_string()])
            .query_async(&mut conn)
            .await?;
        Ok(set > 0)
    }

    /// TTL - 获取键的剩余生存时间 (秒)
    pub async fn ttl(&self, key: &str) -> Result<i64, AppError> {
        let mut conn = self.conn().await?;
        let ttl: i64 = cmd("TTL").arg(&[key]).query_async(&mut conn).await?;
        Ok(ttl)
    }

    /// INCR - 自增, 返回自增后的值
    pub async fn incr(&self, key: &str) -> Result<i64, AppError> {
        let mut conn = self.conn().await?;
        let value: i64 = cmd("INCR").arg(&[key]).query_async(&mut conn).await?;
        Ok(value)
    }
}
