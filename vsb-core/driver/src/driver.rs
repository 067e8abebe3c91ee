//! 虚拟机生命周期驱动
//!
//! 持有已建立的管理平面会话，提供克隆、销毁、硬件配置、电源操作、
//! 快照与模板化等生命周期操作。每个变更型操作都是
//! "提交任务，阻塞等待任务终态"；除关机等待的轮询外，
//! 驱动自身不包含其他控制逻辑。

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use vsb_vimclient::models::{
    CloneSpec, Datacenter, HardwareSpec, PowerState, RelocateSpec, SnapshotRequest, VmRef,
};
use vsb_vimclient::{VimClient, VimConfig, VimService};

use crate::config::{CloneConfig, ConnectConfig, HardwareConfig};
use crate::error::{DriverError, Result};
use crate::finder::InventoryFinder;

/// 关机等待的轮询间隔
const SHUTDOWN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// 快照的固定名称与描述（不捕获内存、不静默）
const SNAPSHOT_NAME: &str = "base";
const SNAPSHOT_DESCRIPTION: &str = "Created by vsb";

/// 虚拟机生命周期驱动
///
/// 除会话句柄外不在两次调用之间保留任何状态。所有操作对调用方
/// 都是同步的：提交请求，阻塞直至远端异步任务报告结果，返回。
///
/// 会话句柄可安全地跨任务共享用于并发的名称解析等只读调用；
/// 针对同一虚拟机的变更操作不应并发发出，远端按对象串行执行
/// 任务，并发提交只会在服务端排队。操作一经提交不可取消
/// （关机等待的期限只停止本地轮询，远端任务照常继续）。
pub struct Driver {
    /// 管理平面服务
    service: Arc<dyn VimService>,

    /// 已解析的数据中心
    datacenter: Datacenter,

    /// 数据中心范围内的名称解析器
    finder: InventoryFinder,
}

impl Driver {
    /// 建立到管理端点的会话
    ///
    /// 解析端点地址、附加凭据并登录，随后解析数据中心。
    /// 端点不可达、凭据被拒绝或数据中心无法唯一解析时
    /// 返回 [`DriverError::Connection`]，不产生驱动句柄。
    pub async fn connect(config: &ConnectConfig) -> Result<Self> {
        info!("建立管理平面会话: {}", config.server);

        let vim_config = VimConfig {
            verify_ssl: !config.insecure,
            ..VimConfig::default()
        };

        let client = VimClient::new(&config.server, vim_config)
            .map_err(|e| DriverError::Connection(e.to_string()))?;
        client
            .login(&config.username, &config.password)
            .await
            .map_err(|e| DriverError::Connection(e.to_string()))?;

        Self::establish(Arc::new(client), config.datacenter.as_deref()).await
    }

    /// 基于已认证的服务句柄建立驱动
    ///
    /// 解析命名的数据中心；未指定名称时要求环境中恰好存在
    /// 一个数据中心。解析成功后将名称解析器绑定到该数据中心。
    pub async fn establish(
        service: Arc<dyn VimService>,
        datacenter: Option<&str>,
    ) -> Result<Self> {
        let datacenter = match datacenter {
            Some(name) => service
                .find_datacenter(name)
                .await
                .map_err(|e| DriverError::Connection(format!("解析数据中心失败: {}", e)))?,
            None => {
                let mut all = service
                    .list_datacenters()
                    .await
                    .map_err(|e| DriverError::Connection(format!("查询数据中心失败: {}", e)))?;
                if all.len() != 1 {
                    return Err(DriverError::Connection(format!(
                        "未指定数据中心，且环境中存在 {} 个数据中心",
                        all.len()
                    )));
                }
                all.remove(0)
            }
        };

        info!("会话建立完成，数据中心: {}", datacenter.name);

        let finder = InventoryFinder::new(Arc::clone(&service), datacenter.clone());
        Ok(Self {
            service,
            datacenter,
            finder,
        })
    }

    /// 驱动绑定的数据中心
    pub fn datacenter(&self) -> &Datacenter {
        &self.datacenter
    }

    /// 按名称或路径解析已存在的虚拟机
    pub async fn find_vm(&self, path: &str) -> Result<VmRef> {
        self.finder.vm(path).await
    }

    /// 克隆虚拟机
    ///
    /// 解析源模板与目标目录/资源池/存储（目录与资源池缺省时
    /// 使用环境默认值），构建落位描述后提交克隆任务（不开机），
    /// 阻塞等待任务完成，返回新虚拟机的引用。
    ///
    /// 请求链接克隆时读取源虚拟机的当前快照；源虚拟机没有快照
    /// 则在提交任何任务之前以 [`DriverError::Configuration`] 失败。
    pub async fn clone_vm(&self, config: &CloneConfig) -> Result<VmRef> {
        info!("克隆虚拟机: {} -> {}", config.template, config.vm_name);

        let source = self.finder.vm(&config.template).await?;
        let folder = self.finder.folder_or_default(config.folder.as_deref()).await?;
        let pool = self
            .finder
            .resource_pool_or_default(config.host.as_deref(), config.resource_pool.as_deref())
            .await?;

        let mut relocate = RelocateSpec::new(pool);
        if let Some(name) = config.datastore.as_deref() {
            relocate = relocate.with_datastore(self.finder.datastore(name).await?);
        }
        if config.linked_clone {
            relocate = relocate.with_child_disk_backing();
        }

        let mut spec = CloneSpec::new(relocate);
        if config.linked_clone {
            let snapshot = self
                .service
                .current_snapshot(&source)
                .await
                .map_err(|e| DriverError::Call(format!("读取源虚拟机快照失败: {}", e)))?;
            match snapshot {
                Some(snapshot) => spec = spec.with_snapshot(snapshot),
                None => {
                    return Err(DriverError::Configuration(
                        "请求了链接克隆，但源虚拟机没有快照".to_string(),
                    ))
                }
            }
        }

        let task = self
            .service
            .submit_clone(&source, &folder, &config.vm_name, &spec)
            .await?;
        let info = self.service.wait_for_task(&task).await?;

        let vm_id = info
            .result
            .ok_or_else(|| DriverError::Task("克隆任务未返回虚拟机引用".to_string()))?;

        info!("克隆完成: {} -> {}", config.vm_name, vm_id);
        Ok(VmRef::new(vm_id))
    }

    /// 销毁虚拟机
    ///
    /// 不做确认与依赖检查，约束由远端强制执行。
    pub async fn destroy(&self, vm: &VmRef) -> Result<()> {
        info!("销毁虚拟机: {}", vm);
        let task = self.service.submit_destroy(vm).await?;
        self.service.wait_for_task(&task).await?;
        Ok(())
    }

    /// 变更虚拟机硬件配置
    ///
    /// 以单个任务提交配置增量；未设置的字段不出现在请求中，
    /// 由服务端的合并语义保持原值。
    pub async fn reconfigure(&self, vm: &VmRef, config: &HardwareConfig) -> Result<()> {
        info!(
            "变更硬件配置: {}, CPU: {:?}, 内存: {:?} MB",
            vm, config.cpus, config.ram_mb
        );

        let mut spec = HardwareSpec::new();
        if let Some(cpus) = config.cpus {
            spec = spec.with_cpus(cpus);
        }
        if let Some(ram_mb) = config.ram_mb {
            spec = spec.with_memory_mb(ram_mb);
        }
        if let Some(mhz) = config.cpu_reservation_mhz {
            spec = spec.with_cpu_reservation(mhz);
        }
        if let Some(mhz) = config.cpu_limit_mhz {
            spec = spec.with_cpu_limit(mhz);
        }
        if let Some(mb) = config.ram_reservation_mb {
            spec = spec.with_memory_reservation(mb);
        }
        spec = spec.with_memory_reservation_locked(config.ram_reserve_all);

        let task = self.service.submit_reconfigure(vm, &spec).await?;
        self.service.wait_for_task(&task).await?;
        Ok(())
    }

    /// 查询虚拟机电源状态
    pub async fn power_state(&self, vm: &VmRef) -> Result<PowerState> {
        Ok(self.service.power_state(vm).await?)
    }

    /// 开机
    pub async fn power_on(&self, vm: &VmRef) -> Result<()> {
        info!("开机: {}", vm);
        let task = self.service.submit_power_on(vm).await?;
        self.service.wait_for_task(&task).await?;
        Ok(())
    }

    /// 强制关机
    ///
    /// 虚拟机已处于关机状态时直接返回成功，不提交任何任务。
    pub async fn power_off(&self, vm: &VmRef) -> Result<()> {
        let state = self.service.power_state(vm).await?;
        if state == PowerState::PoweredOff {
            debug!("虚拟机 {} 已关机，跳过", vm);
            return Ok(());
        }

        info!("强制关机: {}", vm);
        let task = self.service.submit_power_off(vm).await?;
        self.service.wait_for_task(&task).await?;
        Ok(())
    }

    /// 请求客户机操作系统优雅关机
    ///
    /// 只下发请求，不等待关机完成；配合
    /// [`wait_for_shutdown`](Driver::wait_for_shutdown) 使用。
    pub async fn start_shutdown(&self, vm: &VmRef) -> Result<()> {
        info!("请求客户机关机: {}", vm);
        Ok(self.service.shutdown_guest(vm).await?)
    }

    /// 等待虚拟机关机
    ///
    /// 以固定的 1 秒间隔轮询电源状态，直至报告已关机或超出
    /// `timeout`，超时返回 [`DriverError::Timeout`]。
    /// 超时不撤销仍在进行的客户机关机请求，也不区分
    /// "客户机未收到关机信号"与"客户机关机缓慢"。
    pub async fn wait_for_shutdown(&self, vm: &VmRef, timeout: Duration) -> Result<()> {
        info!("等待虚拟机关机: {} (超时 {:?})", vm, timeout);

        let deadline = Instant::now() + timeout;
        loop {
            let state = self.service.power_state(vm).await?;
            if state == PowerState::PoweredOff {
                info!("虚拟机已关机: {}", vm);
                return Ok(());
            }

            if Instant::now() >= deadline {
                return Err(DriverError::Timeout(format!(
                    "等待虚拟机 {} 关机超时",
                    vm
                )));
            }

            sleep(SHUTDOWN_POLL_INTERVAL).await;
        }
    }

    /// 等待客户机上报 IP 地址
    ///
    /// 完全委托给远端自身的 IP 发现等待原语，阻塞直至地址上报
    /// 或该调用按其自身契约失败/超时。
    pub async fn wait_for_ip(&self, vm: &VmRef) -> Result<String> {
        info!("等待客户机 IP: {}", vm);
        let ip = self.service.wait_for_guest_ip(vm).await?;
        info!("客户机 IP: {} -> {}", vm, ip);
        Ok(ip)
    }

    /// 创建快照
    ///
    /// 固定描述，不捕获内存状态、不静默客户机文件系统。
    pub async fn create_snapshot(&self, vm: &VmRef) -> Result<()> {
        info!("创建快照: {}", vm);
        let request = SnapshotRequest::new(SNAPSHOT_NAME, SNAPSHOT_DESCRIPTION);
        let task = self.service.submit_snapshot(vm, &request).await?;
        self.service.wait_for_task(&task).await?;
        Ok(())
    }

    /// 将虚拟机标记为模板
    ///
    /// 远端同步调用，无任务对象，调用返回即完成。
    pub async fn mark_as_template(&self, vm: &VmRef) -> Result<()> {
        info!("标记为模板: {}", vm);
        Ok(self.service.mark_as_template(vm).await?)
    }

    /// 结束远端会话
    pub async fn logout(&self) -> Result<()> {
        Ok(self.service.logout().await?)
    }
}
