//! 驱动配置
//!
//! 三组配置分别对应会话建立、克隆请求和硬件配置变更。
//! 连接配置在会话建立后不再变更；克隆与硬件配置只用于
//! 构建单次远端请求，不被驱动保留。

use serde::{Deserialize, Serialize};

/// 连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectConfig {
    /// 管理端点地址（主机名或 `主机:端口`）
    pub server: String,

    /// 用户名
    pub username: String,

    /// 密码
    pub password: String,

    /// 数据中心名称；缺省时要求环境中只有一个数据中心
    #[serde(default)]
    pub datacenter: Option<String>,

    /// 跳过 SSL 证书验证
    #[serde(default)]
    pub insecure: bool,
}

/// 克隆请求配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CloneConfig {
    /// 源模板虚拟机名称
    pub template: String,

    /// 新虚拟机名称
    pub vm_name: String,

    /// 目标目录名称；缺省时使用数据中心的默认虚拟机目录
    #[serde(default)]
    pub folder: Option<String>,

    /// 目标主机名称（用于定位资源池）
    #[serde(default)]
    pub host: Option<String>,

    /// 目标资源池名称；缺省时使用默认资源池
    #[serde(default)]
    pub resource_pool: Option<String>,

    /// 目标存储名称；缺省时由服务端沿用源虚拟机的存储
    #[serde(default)]
    pub datastore: Option<String>,

    /// 链接克隆：与源虚拟机共享基础磁盘（要求源虚拟机存在快照）
    #[serde(default)]
    pub linked_clone: bool,
}

/// 硬件配置
///
/// 为 `None` 的字段不会出现在变更请求中，保持服务端原值。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HardwareConfig {
    /// CPU 核心数
    #[serde(default)]
    pub cpus: Option<u32>,

    /// 内存大小 (MB)
    #[serde(default)]
    pub ram_mb: Option<u64>,

    /// CPU 预留 (MHz)
    #[serde(default)]
    pub cpu_reservation_mhz: Option<i64>,

    /// CPU 上限 (MHz)，-1 表示不限制
    #[serde(default)]
    pub cpu_limit_mhz: Option<i64>,

    /// 内存预留 (MB)
    #[serde(default)]
    pub ram_reservation_mb: Option<i64>,

    /// 内存预留锁定为配置上限
    #[serde(default)]
    pub ram_reserve_all: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_config_deserialize_minimal() {
        let json = r#"{
            "server": "vcenter.example.com",
            "username": "administrator",
            "password": "secret"
        }"#;

        let config: ConnectConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.server, "vcenter.example.com");
        assert!(config.datacenter.is_none());
        assert!(!config.insecure);
    }

    #[test]
    fn test_clone_config_defaults() {
        let config = CloneConfig {
            template: "ubuntu-2204".to_string(),
            vm_name: "build-01".to_string(),
            ..Default::default()
        };

        assert!(config.folder.is_none());
        assert!(config.resource_pool.is_none());
        assert!(config.datastore.is_none());
        assert!(!config.linked_clone);
    }

    #[test]
    fn test_hardware_config_deserialize_partial() {
        let json = r#"{"cpus": 4, "ram_mb": 8192}"#;

        let config: HardwareConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.cpus, Some(4));
        assert_eq!(config.ram_mb, Some(8192));
        assert!(config.cpu_reservation_mhz.is_none());
        assert!(!config.ram_reserve_all);
    }
}
