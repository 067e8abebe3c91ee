//! 库存名称解析
//!
//! 会话建立时绑定到已解析的数据中心，之后所有基于路径的查找
//! 都限定在该数据中心内。解析失败原样上抛，驱动不做兜底。

use std::sync::Arc;

use vsb_vimclient::models::{Datacenter, DatastoreRef, FolderRef, PoolRef, VmRef};
use vsb_vimclient::VimService;

use crate::error::Result;

/// 目录的库存路径: /{数据中心}/vm/{目录}
fn folder_path(datacenter: &str, name: &str) -> String {
    format!("/{}/vm/{}", datacenter, name)
}

/// 资源池的库存路径: /{数据中心}/host/{主机}/Resources/{资源池}
fn pool_path(datacenter: &str, host: &str, name: &str) -> String {
    format!("/{}/host/{}/Resources/{}", datacenter, host, name)
}

/// 数据中心范围内的名称解析器
pub struct InventoryFinder {
    /// 管理平面服务
    service: Arc<dyn VimService>,

    /// 已解析的数据中心（建立会话时设置，之后不变）
    datacenter: Datacenter,
}

impl InventoryFinder {
    /// 创建绑定到指定数据中心的解析器
    pub fn new(service: Arc<dyn VimService>, datacenter: Datacenter) -> Self {
        Self {
            service,
            datacenter,
        }
    }

    /// 解析器绑定的数据中心
    pub fn datacenter(&self) -> &Datacenter {
        &self.datacenter
    }

    /// 按名称或路径解析虚拟机
    pub async fn vm(&self, path: &str) -> Result<VmRef> {
        Ok(self.service.find_vm(&self.datacenter, path).await?)
    }

    /// 解析目录，缺省时使用数据中心的默认虚拟机目录
    pub async fn folder_or_default(&self, name: Option<&str>) -> Result<FolderRef> {
        match name {
            Some(name) => {
                let path = folder_path(&self.datacenter.name, name);
                Ok(self.service.find_folder(&path).await?)
            }
            None => Ok(self.service.default_vm_folder(&self.datacenter).await?),
        }
    }

    /// 解析资源池，缺省时使用数据中心的默认资源池
    ///
    /// 指定资源池名称时在 `/{数据中心}/host/{主机}/Resources/` 下解析，
    /// 主机名缺省则留空，由服务端在数据中心内匹配。
    pub async fn resource_pool_or_default(
        &self,
        host: Option<&str>,
        name: Option<&str>,
    ) -> Result<PoolRef> {
        match name {
            Some(name) => {
                let path = pool_path(&self.datacenter.name, host.unwrap_or_default(), name);
                Ok(self.service.find_resource_pool(&path).await?)
            }
            None => Ok(self.service.default_resource_pool(&self.datacenter).await?),
        }
    }

    /// 在数据中心内按名称解析存储
    pub async fn datastore(&self, name: &str) -> Result<DatastoreRef> {
        Ok(self.service.find_datastore(&self.datacenter, name).await?)
    }
}
