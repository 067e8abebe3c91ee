//! 管理平面客户端错误定义

use thiserror::Error;

/// 管理平面客户端错误类型
#[derive(Error, Debug)]
pub enum VimError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("HTTP 错误: {0}")]
    Http(String),

    #[error("认证错误: {0}")]
    Auth(String),

    #[error("API 错误 [{0}]: {1}")]
    Api(u16, String),

    #[error("解析错误: {0}")]
    Parse(String),

    #[error("资源不存在: {0}")]
    NotFound(String),

    #[error("远端任务失败: {0}")]
    TaskFailed(String),

    #[error("超时错误: {0}")]
    Timeout(String),
}

/// 管理平面客户端结果类型
pub type Result<T> = std::result::Result<T, VimError>;
