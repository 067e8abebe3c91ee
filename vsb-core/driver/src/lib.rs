//! 虚拟机生命周期驱动
//!
//! 面向构建编排流程的虚拟机生命周期封装：建立到虚拟化管理平面的
//! 会话后，提供克隆、销毁、硬件配置、电源操作、客户机关机等待、
//! IP 等待、快照与模板化操作。每个变更型操作都阻塞等待远端
//! 异步任务的结果；失败不做本地重试，原样返回调用方处理。
//!
//! # 示例
//!
//! ```ignore
//! use vsb_driver::{CloneConfig, ConnectConfig, Driver, HardwareConfig};
//!
//! let config = ConnectConfig {
//!     server: "vcenter.example.com".to_string(),
//!     username: "administrator".to_string(),
//!     password: "password".to_string(),
//!     datacenter: Some("dc-1".to_string()),
//!     insecure: false,
//! };
//! let driver = Driver::connect(&config).await?;
//!
//! // 从模板克隆并开机
//! let vm = driver.clone_vm(&CloneConfig {
//!     template: "ubuntu-2204".to_string(),
//!     vm_name: "build-01".to_string(),
//!     ..Default::default()
//! }).await?;
//! driver.reconfigure(&vm, &HardwareConfig {
//!     cpus: Some(4),
//!     ram_mb: Some(8192),
//!     ..Default::default()
//! }).await?;
//! driver.power_on(&vm).await?;
//! let ip = driver.wait_for_ip(&vm).await?;
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod finder;

pub use config::{CloneConfig, ConnectConfig, HardwareConfig};
pub use driver::Driver;
pub use error::{DriverError, Result};
pub use finder::InventoryFinder;
