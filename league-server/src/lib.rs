//! League Server - 赛季纪律与停赛引擎
//!
//! # 架构概述
//!
//! 将比赛红黄牌事件转换为可执行的球员停赛记录，并可随时从源事件完整重算：
//!
//! - **纪律引擎** (`discipline`): 汇总、规则、停赛生命周期、重算、出场资格
//! - **数据库** (`db`): SQLite (sqlx) 连接池、迁移和仓储函数
//! - **HTTP API** (`api`): 管理接口和赛程服务回调
//!
//! # 模块结构
//!
//! ```text
//! league-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── db/            # 连接池、仓储
//! ├── discipline/    # 停赛引擎
//! ├── api/           # HTTP 路由和处理器
//! ├── routes/        # 路由组装和中间件栈
//! ├── middleware/    # 请求日志
//! └── utils/         # 日志、错误类型
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod discipline;
pub mod middleware;
pub mod routes;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use discipline::{DisciplinePolicy, DisciplineService};
pub use utils::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 加载 `.env` 并初始化日志
pub fn setup_environment() -> Config {
    if let Err(e) = dotenv::dotenv() {
        // .env 是可选的
        eprintln!("No .env loaded: {e}");
    }
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}

pub fn print_banner() {
    println!(
        r#"
    __                                 _____
   / /   ___  ____ _____ ___  _____   / ___/___  ______   _____  _____
  / /   / _ \/ __ `/ __ `/ / / / _ \  \__ \/ _ \/ ___/ | / / _ \/ ___/
 / /___/  __/ /_/ / /_/ / /_/ /  __/ ___/ /  __/ /   | |/ /  __/ /
/_____/\___/\__,_/\__, /\__,_/\___/ /____/\___/_/    |___/\___/_/
                 /____/
    "#
    );
}
