//! 库存查询 API
//!
//! 按名称/库存路径把远端对象解析为受管对象引用。
//! 引用只在一次调用链内使用，不做本地缓存。

use reqwest::Method;
use tracing::info;

use crate::api::IdBody;
use crate::client::VimClient;
use crate::error::{Result, VimError};
use crate::models::{Datacenter, DatastoreRef, FolderRef, PoolRef, VmRef};

/// 库存查询 API
pub struct InventoryApi<'a> {
    client: &'a VimClient,
}

impl<'a> InventoryApi<'a> {
    /// 创建新的库存 API 实例
    pub(crate) fn new(client: &'a VimClient) -> Self {
        Self { client }
    }

    /// 列出所有数据中心
    pub async fn list_datacenters(&self) -> Result<Vec<Datacenter>> {
        info!("查询数据中心列表");
        self.client
            .request(Method::GET, "/datacenter", None::<()>)
            .await
    }

    /// 按名称解析数据中心
    ///
    /// 名称必须唯一命中，命中多个视为解析失败。
    pub async fn find_datacenter(&self, name: &str) -> Result<Datacenter> {
        info!("解析数据中心: {}", name);

        let mut matches: Vec<Datacenter> = self
            .client
            .request(
                Method::GET,
                &format!("/datacenter?name={}", urlencoding::encode(name)),
                None::<()>,
            )
            .await?;

        match matches.len() {
            0 => Err(VimError::NotFound(format!("数据中心 {} 不存在", name))),
            1 => Ok(matches.remove(0)),
            n => Err(VimError::NotFound(format!(
                "数据中心名称 {} 命中 {} 个对象，无法唯一解析",
                name, n
            ))),
        }
    }

    /// 按库存路径解析目录
    pub async fn find_folder(&self, path: &str) -> Result<FolderRef> {
        info!("解析目录: {}", path);
        let body: IdBody = self
            .client
            .request(
                Method::GET,
                &format!("/inventory/folder?path={}", urlencoding::encode(path)),
                None::<()>,
            )
            .await?;
        Ok(FolderRef::new(body.id))
    }

    /// 数据中心的默认虚拟机目录
    pub async fn default_vm_folder(&self, datacenter: &Datacenter) -> Result<FolderRef> {
        info!("解析数据中心 {} 的默认虚拟机目录", datacenter.name);
        let body: IdBody = self
            .client
            .request(
                Method::GET,
                &format!("/datacenter/{}/vm-folder", datacenter.id),
                None::<()>,
            )
            .await?;
        Ok(FolderRef::new(body.id))
    }

    /// 按库存路径解析资源池
    pub async fn find_resource_pool(&self, path: &str) -> Result<PoolRef> {
        info!("解析资源池: {}", path);
        let body: IdBody = self
            .client
            .request(
                Method::GET,
                &format!(
                    "/inventory/resource-pool?path={}",
                    urlencoding::encode(path)
                ),
                None::<()>,
            )
            .await?;
        Ok(PoolRef::new(body.id))
    }

    /// 数据中心的默认资源池
    pub async fn default_resource_pool(&self, datacenter: &Datacenter) -> Result<PoolRef> {
        info!("解析数据中心 {} 的默认资源池", datacenter.name);
        let body: IdBody = self
            .client
            .request(
                Method::GET,
                &format!("/datacenter/{}/resource-pool", datacenter.id),
                None::<()>,
            )
            .await?;
        Ok(PoolRef::new(body.id))
    }

    /// 在数据中心内按名称解析存储
    pub async fn find_datastore(
        &self,
        datacenter: &Datacenter,
        name: &str,
    ) -> Result<DatastoreRef> {
        info!("解析存储: {} (数据中心: {})", name, datacenter.name);
        let body: IdBody = self
            .client
            .request(
                Method::GET,
                &format!(
                    "/inventory/datastore?datacenter={}&name={}",
                    datacenter.id,
                    urlencoding::encode(name)
                ),
                None::<()>,
            )
            .await?;
        Ok(DatastoreRef::new(body.id))
    }

    /// 在数据中心内按名称或路径解析虚拟机
    pub async fn find_vm(&self, datacenter: &Datacenter, path: &str) -> Result<VmRef> {
        info!("解析虚拟机: {} (数据中心: {})", path, datacenter.name);
        let body: IdBody = self
            .client
            .request(
                Method::GET,
                &format!(
                    "/inventory/vm?datacenter={}&path={}",
                    datacenter.id,
                    urlencoding::encode(path)
                ),
                None::<()>,
            )
            .await?;
        Ok(VmRef::new(body.id))
    }
}
