//! 管理平面数据模型
//!
//! 远端对象引用一律以服务端分配的受管对象标识符表示，
//! 并按能力分别包装（虚拟机、目录、资源池、存储、快照、任务），
//! 互相之间不可混用。引用只能由名称解析或任务结果产生，
//! 客户端不长期缓存。

use std::fmt;

use serde::{Deserialize, Serialize};

/// 链接克隆的磁盘迁移方式：与源虚拟机共享基础磁盘（写时复制）
pub const DISK_MOVE_CHILD: &str = "createNewChildDiskBacking";

// ============================================
// 受管对象引用
// ============================================

/// 虚拟机引用
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VmRef(String);

impl VmRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// 服务端分配的对象标识符
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VmRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 目录引用
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FolderRef(String);

impl FolderRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 资源池引用
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolRef(String);

impl PoolRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PoolRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 存储引用
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatastoreRef(String);

impl DatastoreRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatastoreRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 快照引用
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotRef(String);

impl SnapshotRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnapshotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 异步任务引用
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskRef(String);

impl TaskRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 数据中心信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datacenter {
    /// 数据中心 ID
    pub id: String,

    /// 数据中心名称
    pub name: String,
}

// ============================================
// 电源状态
// ============================================

/// 虚拟机电源状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerState {
    /// 已开机
    PoweredOn,

    /// 已关机
    PoweredOff,

    /// 已挂起
    Suspended,
}

impl PowerState {
    /// 线上状态字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerState::PoweredOn => "poweredOn",
            PowerState::PoweredOff => "poweredOff",
            PowerState::Suspended => "suspended",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================
// 克隆请求
// ============================================

/// 克隆的落位描述：目标资源池、可选目标存储、可选磁盘迁移方式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelocateSpec {
    /// 目标资源池
    pub pool: PoolRef,

    /// 目标存储（缺省时由服务端沿用源虚拟机的存储）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datastore: Option<DatastoreRef>,

    /// 磁盘迁移方式（链接克隆时为 [`DISK_MOVE_CHILD`]）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_move_type: Option<String>,
}

impl RelocateSpec {
    pub fn new(pool: PoolRef) -> Self {
        Self {
            pool,
            datastore: None,
            disk_move_type: None,
        }
    }

    pub fn with_datastore(mut self, datastore: DatastoreRef) -> Self {
        self.datastore = Some(datastore);
        self
    }

    /// 链接克隆：新虚拟机以子磁盘方式共享源虚拟机的基础磁盘
    pub fn with_child_disk_backing(mut self) -> Self {
        self.disk_move_type = Some(DISK_MOVE_CHILD.to_string());
        self
    }
}

/// 克隆描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneSpec {
    /// 落位描述
    pub location: RelocateSpec,

    /// 克隆完成后是否开机
    pub power_on: bool,

    /// 链接克隆的基准快照
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<SnapshotRef>,
}

impl CloneSpec {
    /// 创建克隆描述（默认不开机）
    pub fn new(location: RelocateSpec) -> Self {
        Self {
            location,
            power_on: false,
            snapshot: None,
        }
    }

    pub fn with_snapshot(mut self, snapshot: SnapshotRef) -> Self {
        self.snapshot = Some(snapshot);
        self
    }
}

// ============================================
// 硬件配置
// ============================================

/// 硬件配置增量
///
/// 为 `None` 的字段不会出现在请求中，由服务端的合并语义保持原值不变。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareSpec {
    /// CPU 核心数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_cpus: Option<u32>,

    /// 内存大小 (MB)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_mb: Option<u64>,

    /// CPU 预留 (MHz)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_reservation_mhz: Option<i64>,

    /// CPU 上限 (MHz)，-1 表示不限制
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_limit_mhz: Option<i64>,

    /// 内存预留 (MB)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_reservation_mb: Option<i64>,

    /// 内存预留锁定为配置上限
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_reservation_locked_to_max: Option<bool>,
}

impl HardwareSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cpus(mut self, num_cpus: u32) -> Self {
        self.num_cpus = Some(num_cpus);
        self
    }

    pub fn with_memory_mb(mut self, memory_mb: u64) -> Self {
        self.memory_mb = Some(memory_mb);
        self
    }

    pub fn with_cpu_reservation(mut self, mhz: i64) -> Self {
        self.cpu_reservation_mhz = Some(mhz);
        self
    }

    pub fn with_cpu_limit(mut self, mhz: i64) -> Self {
        self.cpu_limit_mhz = Some(mhz);
        self
    }

    pub fn with_memory_reservation(mut self, mb: i64) -> Self {
        self.memory_reservation_mb = Some(mb);
        self
    }

    pub fn with_memory_reservation_locked(mut self, locked: bool) -> Self {
        self.memory_reservation_locked_to_max = Some(locked);
        self
    }
}

// ============================================
// 快照请求
// ============================================

/// 快照创建请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRequest {
    /// 快照名称
    pub name: String,

    /// 快照描述
    pub description: String,

    /// 是否捕获内存状态
    pub memory: bool,

    /// 是否静默客户机文件系统
    pub quiesce: bool,
}

impl SnapshotRequest {
    /// 创建快照请求（默认不捕获内存、不静默）
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            memory: false,
            quiesce: false,
        }
    }
}

// ============================================
// 异步任务
// ============================================

/// 异步任务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    /// 排队中
    Queued,

    /// 执行中
    Running,

    /// 执行成功
    Success,

    /// 执行失败
    Error,
}

impl TaskState {
    /// 是否为终态
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Success | TaskState::Error)
    }
}

/// 异步任务信息
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    /// 任务引用
    pub task: TaskRef,

    /// 任务状态
    pub state: TaskState,

    /// 任务产物的对象标识符（例如克隆任务产生的新虚拟机）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    /// 失败原因
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
