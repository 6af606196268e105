use std::path::PathBuf;
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::{MailerService, PaymentService};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc / 浅拷贝实现低成本 Clone，注入到每个请求处理函数。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | mailer | MailerService | 事务邮件 (best effort) |
/// | payments | PaymentService | 支付意向与汇率 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 事务邮件服务
    pub mailer: MailerService,
    /// 支付服务
    pub payments: PaymentService,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/store.db)
    /// 3. 各服务 (JWT, Mailer, Payments)
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        // 0. Ensure work_dir structure exists
        let db_dir = PathBuf::from(&config.work_dir).join("database");
        std::fs::create_dir_all(&db_dir).expect("Failed to create database directory");

        // 1. Initialize DB
        let db_path = db_dir.join("store.db");
        let db_service = DbService::open(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        Self::with_db(config, db_service.db)
    }

    /// 初始化服务器状态 (内存数据库，测试用)
    pub async fn initialize_in_memory(config: &Config) -> Self {
        let db_service = DbService::memory()
            .await
            .expect("Failed to initialize in-memory database");

        Self::with_db(config, db_service.db)
    }

    fn with_db(config: &Config, db: Surreal<Db>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let mailer = MailerService::new(config);
        let payments = PaymentService::new(config);

        Self {
            config: config.clone(),
            db,
            jwt_service,
            mailer,
            payments,
        }
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 获取工作目录
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }
}
