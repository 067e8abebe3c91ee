//! vSphere 风格虚拟化管理平面客户端
//!
//! 提供与虚拟化管理端点（数据中心/目录/资源池/存储/虚拟机层级，
//! 异步任务模型）交互的客户端实现。
//!
//! # 功能
//!
//! - **会话管理** (`VimClient`): Basic 认证登录、会话令牌、登出
//! - **库存解析** (`InventoryApi`): 数据中心、目录、资源池、存储、虚拟机的名称/路径解析
//! - **虚拟机操作** (`VmApi`): 克隆、销毁、硬件配置、电源操作、快照、标记为模板
//! - **异步任务** (`TaskApi`): 任务查询与阻塞等待
//! - **服务抽象** (`VimService`): 驱动层依赖的统一接口，便于注入测试替身
//!
//! # 示例
//!
//! ```ignore
//! use vsb_vimclient::{VimClient, VimConfig, VimService};
//!
//! // 创建客户端并登录
//! let client = VimClient::new("vcenter.example.com", VimConfig::default())?;
//! client.login("administrator", "password").await?;
//!
//! // 解析数据中心与虚拟机
//! let datacenter = client.inventory().find_datacenter("dc-1").await?;
//! let vm = client.inventory().find_vm(&datacenter, "ubuntu-2204").await?;
//!
//! // 提交开机任务并等待完成
//! let task = client.vm().power_on(&vm).await?;
//! client.task().wait(&task).await?;
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod models;
pub mod service;

pub use client::{VimClient, VimConfig};
pub use error::{Result, VimError};
pub use service::VimService;

// 导出 API 模块
pub use api::{InventoryApi, TaskApi, VmApi};

// 导出数据模型
pub use models::{
    // 受管对象引用
    DatastoreRef, FolderRef, PoolRef, SnapshotRef, TaskRef, VmRef,

    // 库存与状态
    Datacenter, PowerState,

    // 请求描述
    CloneSpec, HardwareSpec, RelocateSpec, SnapshotRequest,

    // 异步任务
    TaskInfo, TaskState,

    // 常量
    DISK_MOVE_CHILD,
};
