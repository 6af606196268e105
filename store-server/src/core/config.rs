use crate::auth::JwtConfig;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/store/server | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | FRONTEND_URL | http://localhost:3000 | 前端地址 (密码重置链接、CORS) |
/// | MAIL_API_URL | (空 = 不发信) | 邮件 API 地址 |
/// | MAIL_API_TOKEN | (空) | 邮件 API 令牌 |
/// | MAIL_FROM | no-reply@store.local | 发件人地址 |
/// | STRIPE_SECRET_KEY | (空) | Stripe 密钥 |
/// | EXCHANGE_RATE_URL | (见默认值) | 汇率服务地址 (USD/PKR) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/store HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 前端地址 (密码重置链接)
    pub frontend_url: String,

    // === 外部服务配置 ===
    /// 邮件 API 地址 (空字符串 = 不发信，仅记录日志)
    pub mail_api_url: String,
    /// 邮件 API 令牌
    pub mail_api_token: String,
    /// 发件人地址
    pub mail_from: String,
    /// Stripe 密钥
    pub stripe_secret_key: String,
    /// 汇率服务地址 (返回 USD→PKR conversion_rate)
    pub exchange_rate_url: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "/var/lib/store/server".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            frontend_url: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            mail_api_url: std::env::var("MAIL_API_URL").unwrap_or_default(),
            mail_api_token: std::env::var("MAIL_API_TOKEN").unwrap_or_default(),
            mail_from: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "no-reply@store.local".into()),
            stripe_secret_key: std::env::var("STRIPE_SECRET_KEY").unwrap_or_default(),
            exchange_rate_url: std::env::var("EXCHANGE_RATE_URL").unwrap_or_else(|_| {
                "https://v6.exchangerate-api.com/v6/demo/pair/USD/PKR".into()
            }),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
