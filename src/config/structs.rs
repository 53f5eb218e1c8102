use serde::{Deserialize, Serialize};

/// 应用配置，与 config.toml 的节一一对应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub cors: CorsConfig,
    pub argon2: Argon2Config,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    /// development / production，影响日志格式与 cookie 的 secure 标记
    pub environment: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 非空时优先于 host:port 使用 Unix 套接字
    pub unix_socket_path: String,
    /// 0 表示按 CPU 核数自动选择，上限为 max_workers
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// 毫秒
    pub client_request: u64,
    /// 毫秒
    pub client_disconnect: u64,
    /// 秒
    pub keep_alive: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    /// 请求体上限，字节
    pub max_payload_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// 签名密钥，不回显到任何序列化输出
    #[serde(skip_serializing, default)]
    pub secret: String,
    /// access token 有效期，分钟
    pub access_token_expiry: i64,
    /// refresh token 有效期，天
    pub refresh_token_expiry: i64,
    /// 勾选记住我时的 refresh token 有效期，天
    pub refresh_token_remember_me_expiry: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// 连接 URL，数据库类型由 scheme 推断（sqlite / postgres / mysql）
    pub url: String,
    pub pool_size: u32,
    /// 连接与获取超时，秒
    pub timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// 后端名，对应注册表里的 moka / redis
    #[serde(rename = "type")]
    pub cache_type: String,
    /// 秒
    pub default_ttl: u64,
    pub redis: RedisConfig,
    pub memory: MemoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    /// 所有键的统一前缀，含分隔符，如 "attendance:"
    pub key_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    pub max_capacity: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// 含 "*" 时放开全部来源
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    /// 预检结果缓存时间，秒
    pub max_age: usize,
}

/// 密码哈希参数，按部署机器的内存与核数调整
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argon2Config {
    /// KiB
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}
