use crate::core::Config;
use crate::core::error::Result;
use crate::db::DbService;
use crate::discipline::DisciplineService;

/// 服务器状态 - 持有所有服务的共享引用
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | SQLite 连接池 |
/// | discipline | DisciplineService | 停赛引擎 (含赛季锁) |
///
/// 所有字段都是浅拷贝，可以直接作为 axum State 使用。
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub discipline: DisciplineService,
}

impl ServerState {
    pub fn new(config: Config, db: DbService) -> Self {
        let discipline = DisciplineService::new(db.pool.clone(), config.policy);
        Self {
            config,
            db,
            discipline,
        }
    }

    /// 打开数据库 (含迁移) 并组装所有服务
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_path, config.db_max_connections).await?;
        tracing::info!(
            accumulation_threshold = config.policy.accumulation_threshold,
            red_card_ban = config.policy.red_card_ban,
            second_yellow_ban = config.policy.second_yellow_ban,
            accumulation_ban = config.policy.accumulation_ban,
            "Discipline policy loaded"
        );
        Ok(Self::new(config.clone(), db))
    }
}
