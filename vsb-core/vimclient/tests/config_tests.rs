//! 客户端配置测试

use std::time::Duration;

use vsb_vimclient::*;

#[test]
fn test_default_vim_config() {
    let config = VimConfig::default();

    assert_eq!(config.connect_timeout, 10);
    assert_eq!(config.request_timeout, 300);
    assert_eq!(config.verify_ssl, true);
}

#[test]
fn test_custom_vim_config() {
    let config = VimConfig {
        connect_timeout: 5,
        request_timeout: 600,
        verify_ssl: false,
    };

    assert_eq!(config.connect_timeout, 5);
    assert_eq!(config.request_timeout, 600);
    assert_eq!(config.verify_ssl, false);
}

#[test]
fn test_vim_config_duration_methods() {
    let config = VimConfig {
        connect_timeout: 15,
        request_timeout: 120,
        ..Default::default()
    };

    assert_eq!(config.connect_timeout(), Duration::from_secs(15));
    assert_eq!(config.request_timeout(), Duration::from_secs(120));
}

#[test]
fn test_vim_config_deserialize_with_defaults() {
    let config: VimConfig = serde_json::from_str("{}").unwrap();

    assert_eq!(config.connect_timeout, 10);
    assert_eq!(config.request_timeout, 300);
    assert!(config.verify_ssl);
}

#[test]
fn test_vim_config_deserialize_partial() {
    let config: VimConfig = serde_json::from_str(r#"{"verify_ssl": false}"#).unwrap();

    assert_eq!(config.connect_timeout, 10);
    assert!(!config.verify_ssl);
}

#[test]
fn test_vim_client_creation_with_port() {
    let client = VimClient::new("vcenter.example.com:8443", VimConfig::default());
    assert!(client.is_ok());
}
