//! 异步任务 API
//!
//! 管理平面的变更型操作都以异步任务执行，
//! 本模块提供任务查询与阻塞等待。

use std::time::Duration;

use reqwest::Method;
use tracing::{debug, info};

use crate::client::VimClient;
use crate::error::{Result, VimError};
use crate::models::{TaskInfo, TaskRef, TaskState};

/// 任务状态轮询间隔
const TASK_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// 异步任务 API
pub struct TaskApi<'a> {
    client: &'a VimClient,
}

impl<'a> TaskApi<'a> {
    /// 创建新的任务 API 实例
    pub(crate) fn new(client: &'a VimClient) -> Self {
        Self { client }
    }

    /// 查询任务信息
    pub async fn get(&self, task: &TaskRef) -> Result<TaskInfo> {
        self.client
            .request(Method::GET, &format!("/task/{}", task.id()), None::<()>)
            .await
    }

    /// 阻塞等待任务到达终态
    ///
    /// 固定间隔轮询任务资源，直至服务端报告成功或失败。
    /// 服务端按对象串行执行任务，等待时长由任务本身决定，
    /// 这里不设本地上限；单次查询仍受客户端请求超时约束。
    pub async fn wait(&self, task: &TaskRef) -> Result<TaskInfo> {
        info!("等待任务完成: {}", task);

        loop {
            let info = self.get(task).await?;

            match info.state {
                TaskState::Success => {
                    info!("任务完成: {}", task);
                    return Ok(info);
                }
                TaskState::Error => {
                    let reason = info
                        .error
                        .unwrap_or_else(|| "服务端未提供失败原因".to_string());
                    return Err(VimError::TaskFailed(reason));
                }
                _ => {
                    debug!("任务 {} 状态: {:?}", task, info.state);
                    tokio::time::sleep(TASK_POLL_INTERVAL).await;
                }
            }
        }
    }
}
