//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`seasons`] - 赛季纪律：重算、红黄牌汇总、停赛列表
//! - [`suspensions`] - 单条停赛记录：查询、取消
//! - [`matches`] - 完赛通知 (赛程服务回调)
//! - [`eligibility`] - 球员出场资格查询

pub mod extract;

pub mod eligibility;
pub mod health;
pub mod matches;
pub mod seasons;
pub mod suspensions;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
