//! 驱动错误定义
//!
//! 驱动不做任何本地重试或恢复：名称解析、请求提交、任务等待中的
//! 任何失败都只附加所尝试的操作作为上下文，立即返回调用方，
//! 远端错误的消息文本原样透传。

use thiserror::Error;
use vsb_vimclient::VimError;

/// 驱动错误类型
#[derive(Error, Debug)]
pub enum DriverError {
    /// 会话建立失败：端点不可达、凭据被拒绝或数据中心无法唯一解析
    #[error("连接错误: {0}")]
    Connection(String),

    /// 命名的目录/资源池/存储/虚拟机不存在
    #[error("解析错误: {0}")]
    Resolution(String),

    /// 请求在语义上不合法（例如对无快照的模板请求链接克隆）
    #[error("配置错误: {0}")]
    Configuration(String),

    /// 异步任务报告失败
    #[error("远端任务失败: {0}")]
    Task(String),

    /// 同步远端调用失败
    #[error("远端调用失败: {0}")]
    Call(String),

    /// 有界等待超出期限
    #[error("等待超时: {0}")]
    Timeout(String),
}

impl From<VimError> for DriverError {
    fn from(err: VimError) -> Self {
        match err {
            VimError::NotFound(msg) => DriverError::Resolution(msg),
            VimError::TaskFailed(msg) => DriverError::Task(msg),
            VimError::Auth(msg) => DriverError::Connection(msg),
            VimError::Timeout(msg) => DriverError::Timeout(msg),
            other => DriverError::Call(other.to_string()),
        }
    }
}

/// 驱动结果类型
pub type Result<T> = std::result::Result<T, DriverError>;
