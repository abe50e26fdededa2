use thiserror::Error;

/// 服务器启动 / 运行期错误 (请求级错误使用 `AppError`)
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("数据库初始化失败: {0}")]
    Database(#[from] shared::error::AppError),

    #[error("网络 IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 服务器的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
