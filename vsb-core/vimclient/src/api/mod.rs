//! 管理平面 API 模块
//!
//! 提供管理平面 REST API 的分组封装：
//! - 库存查询 (InventoryApi)
//! - 虚拟机操作 (VmApi)
//! - 异步任务 (TaskApi)

use serde::Deserialize;

pub mod inventory;
pub mod task;
pub mod vm;

pub use inventory::InventoryApi;
pub use task::TaskApi;
pub use vm::VmApi;

/// 只携带对象标识符的响应体
#[derive(Debug, Deserialize)]
pub(crate) struct IdBody {
    pub id: String,
}

/// 携带任务标识符的响应体
#[derive(Debug, Deserialize)]
pub(crate) struct TaskBody {
    pub task: String,
}
