//! 虚拟机操作 API
//!
//! 提供虚拟机生命周期相关的远端调用：
//! - 状态读取：电源状态、当前快照
//! - 任务型变更：克隆、销毁、硬件配置、开机/关机、快照
//! - 同步调用：客户机关机请求、标记为模板、客户机 IP 等待

use reqwest::Method;
use serde::Deserialize;
use tracing::info;

use crate::api::TaskBody;
use crate::client::VimClient;
use crate::error::Result;
use crate::models::{
    CloneSpec, HardwareSpec, PowerState, SnapshotRef, SnapshotRequest, TaskRef, VmRef,
};

/// 电源状态响应体
#[derive(Debug, Deserialize)]
struct PowerBody {
    state: PowerState,
}

/// 当前快照响应体
#[derive(Debug, Deserialize)]
struct SnapshotBody {
    snapshot: Option<SnapshotRef>,
}

/// 客户机 IP 响应体
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IpBody {
    ip_address: String,
}

/// 克隆请求体
#[derive(Debug, serde::Serialize)]
struct CloneBody<'a> {
    name: &'a str,
    folder: &'a str,
    spec: &'a CloneSpec,
}

/// 虚拟机操作 API
pub struct VmApi<'a> {
    client: &'a VimClient,
}

impl<'a> VmApi<'a> {
    /// 创建新的虚拟机 API 实例
    pub(crate) fn new(client: &'a VimClient) -> Self {
        Self { client }
    }

    // ============================================
    // 状态读取
    // ============================================

    /// 查询电源状态
    pub async fn power_state(&self, vm: &VmRef) -> Result<PowerState> {
        let body: PowerBody = self
            .client
            .request(Method::GET, &format!("/vm/{}/power", vm.id()), None::<()>)
            .await?;
        Ok(body.state)
    }

    /// 查询当前快照
    pub async fn current_snapshot(&self, vm: &VmRef) -> Result<Option<SnapshotRef>> {
        info!("查询虚拟机当前快照: {}", vm);
        let body: SnapshotBody = self
            .client
            .request(
                Method::GET,
                &format!("/vm/{}/snapshot/current", vm.id()),
                None::<()>,
            )
            .await?;
        Ok(body.snapshot)
    }

    // ============================================
    // 任务型变更
    // ============================================

    /// 提交克隆任务
    pub async fn clone(
        &self,
        source: &VmRef,
        folder: &str,
        name: &str,
        spec: &CloneSpec,
    ) -> Result<TaskRef> {
        info!("提交克隆任务: {} -> {}", source, name);
        let body: TaskBody = self
            .client
            .request(
                Method::POST,
                &format!("/vm/{}/clone", source.id()),
                Some(CloneBody { name, folder, spec }),
            )
            .await?;
        Ok(TaskRef::new(body.task))
    }

    /// 提交销毁任务
    pub async fn destroy(&self, vm: &VmRef) -> Result<TaskRef> {
        info!("提交销毁任务: {}", vm);
        let body: TaskBody = self
            .client
            .request(
                Method::POST,
                &format!("/vm/{}/destroy", vm.id()),
                None::<()>,
            )
            .await?;
        Ok(TaskRef::new(body.task))
    }

    /// 提交硬件配置变更任务
    pub async fn reconfigure(&self, vm: &VmRef, spec: &HardwareSpec) -> Result<TaskRef> {
        info!(
            "提交硬件配置变更任务: {}, CPU: {:?}, 内存: {:?} MB",
            vm, spec.num_cpus, spec.memory_mb
        );
        let body: TaskBody = self
            .client
            .request(
                Method::PATCH,
                &format!("/vm/{}/hardware", vm.id()),
                Some(spec),
            )
            .await?;
        Ok(TaskRef::new(body.task))
    }

    /// 提交开机任务
    pub async fn power_on(&self, vm: &VmRef) -> Result<TaskRef> {
        info!("提交开机任务: {}", vm);
        let body: TaskBody = self
            .client
            .request(
                Method::POST,
                &format!("/vm/{}/power-on", vm.id()),
                None::<()>,
            )
            .await?;
        Ok(TaskRef::new(body.task))
    }

    /// 提交关机任务
    pub async fn power_off(&self, vm: &VmRef) -> Result<TaskRef> {
        info!("提交关机任务: {}", vm);
        let body: TaskBody = self
            .client
            .request(
                Method::POST,
                &format!("/vm/{}/power-off", vm.id()),
                None::<()>,
            )
            .await?;
        Ok(TaskRef::new(body.task))
    }

    /// 提交快照创建任务
    pub async fn snapshot(&self, vm: &VmRef, request: &SnapshotRequest) -> Result<TaskRef> {
        info!("提交快照创建任务: {} -> {}", vm, request.name);
        let body: TaskBody = self
            .client
            .request(
                Method::POST,
                &format!("/vm/{}/snapshot", vm.id()),
                Some(request),
            )
            .await?;
        Ok(TaskRef::new(body.task))
    }

    // ============================================
    // 同步调用
    // ============================================

    /// 请求客户机操作系统优雅关机
    ///
    /// 该调用只下发请求，不产生任务对象，也不等待关机完成。
    pub async fn shutdown_guest(&self, vm: &VmRef) -> Result<()> {
        info!("请求客户机关机: {}", vm);
        self.client
            .execute(
                Method::POST,
                &format!("/vm/{}/guest/shutdown", vm.id()),
                None::<()>,
            )
            .await
    }

    /// 将虚拟机标记为模板
    pub async fn mark_as_template(&self, vm: &VmRef) -> Result<()> {
        info!("标记为模板: {}", vm);
        self.client
            .execute(
                Method::POST,
                &format!("/vm/{}/mark-as-template", vm.id()),
                None::<()>,
            )
            .await
    }

    /// 等待客户机上报 IP 地址
    ///
    /// 服务端在本次调用内长轮询，直至地址上报或服务端自身超时。
    pub async fn wait_for_guest_ip(&self, vm: &VmRef) -> Result<String> {
        info!("等待客户机 IP: {}", vm);
        let body: IpBody = self
            .client
            .request(
                Method::GET,
                &format!("/vm/{}/guest/ip?wait=true", vm.id()),
                None::<()>,
            )
            .await?;
        Ok(body.ip_address)
    }
}
