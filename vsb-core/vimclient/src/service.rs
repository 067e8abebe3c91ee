//! 管理平面抽象接口
//!
//! 驱动层只依赖此 trait，不依赖具体的 HTTP 实现，
//! 测试时可注入内存中的假管理平面。

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    CloneSpec, Datacenter, DatastoreRef, FolderRef, HardwareSpec, PoolRef, PowerState,
    SnapshotRef, SnapshotRequest, TaskInfo, TaskRef, VmRef,
};

/// 管理平面服务接口
///
/// 变更型操作一律返回 [`TaskRef`]，调用方必须随后通过
/// [`wait_for_task`](VimService::wait_for_task) 等待任务终态；
/// 任何变更在任务报告成功或失败之前都不算完成。
#[async_trait]
pub trait VimService: Send + Sync {
    // ============================================
    // 库存解析
    // ============================================

    /// 列出所有数据中心
    async fn list_datacenters(&self) -> Result<Vec<Datacenter>>;

    /// 按名称解析数据中心（名称必须唯一命中）
    async fn find_datacenter(&self, name: &str) -> Result<Datacenter>;

    /// 按库存路径解析目录
    async fn find_folder(&self, path: &str) -> Result<FolderRef>;

    /// 数据中心的默认虚拟机目录
    async fn default_vm_folder(&self, datacenter: &Datacenter) -> Result<FolderRef>;

    /// 按库存路径解析资源池
    async fn find_resource_pool(&self, path: &str) -> Result<PoolRef>;

    /// 数据中心的默认资源池
    async fn default_resource_pool(&self, datacenter: &Datacenter) -> Result<PoolRef>;

    /// 在数据中心内按名称解析存储
    async fn find_datastore(&self, datacenter: &Datacenter, name: &str) -> Result<DatastoreRef>;

    /// 在数据中心内按名称或路径解析虚拟机
    async fn find_vm(&self, datacenter: &Datacenter, path: &str) -> Result<VmRef>;

    // ============================================
    // 状态读取
    // ============================================

    /// 查询虚拟机电源状态
    async fn power_state(&self, vm: &VmRef) -> Result<PowerState>;

    /// 查询虚拟机当前快照（无快照时为 `None`）
    async fn current_snapshot(&self, vm: &VmRef) -> Result<Option<SnapshotRef>>;

    // ============================================
    // 任务提交
    // ============================================

    /// 提交克隆任务
    async fn submit_clone(
        &self,
        source: &VmRef,
        folder: &FolderRef,
        name: &str,
        spec: &CloneSpec,
    ) -> Result<TaskRef>;

    /// 提交销毁任务
    async fn submit_destroy(&self, vm: &VmRef) -> Result<TaskRef>;

    /// 提交硬件配置变更任务
    async fn submit_reconfigure(&self, vm: &VmRef, spec: &HardwareSpec) -> Result<TaskRef>;

    /// 提交开机任务
    async fn submit_power_on(&self, vm: &VmRef) -> Result<TaskRef>;

    /// 提交关机任务
    async fn submit_power_off(&self, vm: &VmRef) -> Result<TaskRef>;

    /// 提交快照创建任务
    async fn submit_snapshot(&self, vm: &VmRef, request: &SnapshotRequest) -> Result<TaskRef>;

    // ============================================
    // 同步调用（无任务对象）
    // ============================================

    /// 请求客户机操作系统优雅关机（只发出请求，不等待关机完成）
    async fn shutdown_guest(&self, vm: &VmRef) -> Result<()>;

    /// 将虚拟机标记为模板
    async fn mark_as_template(&self, vm: &VmRef) -> Result<()>;

    /// 等待客户机上报 IP 地址
    ///
    /// 完全委托给服务端自身的 IP 发现等待原语，
    /// 阻塞直至地址上报或该调用按其自身契约失败/超时。
    async fn wait_for_guest_ip(&self, vm: &VmRef) -> Result<String>;

    /// 结束远端会话
    async fn logout(&self) -> Result<()>;

    // ============================================
    // 任务等待
    // ============================================

    /// 阻塞等待任务到达终态
    ///
    /// 任务报告失败时返回 [`VimError::TaskFailed`](crate::VimError::TaskFailed)。
    async fn wait_for_task(&self, task: &TaskRef) -> Result<TaskInfo>;
}

#[async_trait]
impl VimService for crate::VimClient {
    async fn list_datacenters(&self) -> Result<Vec<Datacenter>> {
        self.inventory().list_datacenters().await
    }

    async fn find_datacenter(&self, name: &str) -> Result<Datacenter> {
        self.inventory().find_datacenter(name).await
    }

    async fn find_folder(&self, path: &str) -> Result<FolderRef> {
        self.inventory().find_folder(path).await
    }

    async fn default_vm_folder(&self, datacenter: &Datacenter) -> Result<FolderRef> {
        self.inventory().default_vm_folder(datacenter).await
    }

    async fn find_resource_pool(&self, path: &str) -> Result<PoolRef> {
        self.inventory().find_resource_pool(path).await
    }

    async fn default_resource_pool(&self, datacenter: &Datacenter) -> Result<PoolRef> {
        self.inventory().default_resource_pool(datacenter).await
    }

    async fn find_datastore(&self, datacenter: &Datacenter, name: &str) -> Result<DatastoreRef> {
        self.inventory().find_datastore(datacenter, name).await
    }

    async fn find_vm(&self, datacenter: &Datacenter, path: &str) -> Result<VmRef> {
        self.inventory().find_vm(datacenter, path).await
    }

    async fn power_state(&self, vm: &VmRef) -> Result<PowerState> {
        self.vm().power_state(vm).await
    }

    async fn current_snapshot(&self, vm: &VmRef) -> Result<Option<SnapshotRef>> {
        self.vm().current_snapshot(vm).await
    }

    async fn submit_clone(
        &self,
        source: &VmRef,
        folder: &FolderRef,
        name: &str,
        spec: &CloneSpec,
    ) -> Result<TaskRef> {
        self.vm().clone(source, folder.id(), name, spec).await
    }

    async fn submit_destroy(&self, vm: &VmRef) -> Result<TaskRef> {
        self.vm().destroy(vm).await
    }

    async fn submit_reconfigure(&self, vm: &VmRef, spec: &HardwareSpec) -> Result<TaskRef> {
        self.vm().reconfigure(vm, spec).await
    }

    async fn submit_power_on(&self, vm: &VmRef) -> Result<TaskRef> {
        self.vm().power_on(vm).await
    }

    async fn submit_power_off(&self, vm: &VmRef) -> Result<TaskRef> {
        self.vm().power_off(vm).await
    }

    async fn submit_snapshot(&self, vm: &VmRef, request: &SnapshotRequest) -> Result<TaskRef> {
        self.vm().snapshot(vm, request).await
    }

    async fn shutdown_guest(&self, vm: &VmRef) -> Result<()> {
        self.vm().shutdown_guest(vm).await
    }

    async fn mark_as_template(&self, vm: &VmRef) -> Result<()> {
        self.vm().mark_as_template(vm).await
    }

    async fn wait_for_guest_ip(&self, vm: &VmRef) -> Result<String> {
        self.vm().wait_for_guest_ip(vm).await
    }

    async fn logout(&self) -> Result<()> {
        crate::VimClient::logout(self).await
    }

    async fn wait_for_task(&self, task: &TaskRef) -> Result<TaskInfo> {
        self.task().wait(task).await
    }
}
