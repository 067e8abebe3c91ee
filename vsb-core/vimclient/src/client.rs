//! 管理平面客户端核心实现

use std::sync::Arc;

use base64::Engine as _;
use reqwest::{Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::api::{InventoryApi, TaskApi, VmApi};
use crate::error::{Result, VimError};

/// 会话令牌的请求头名称
const SESSION_HEADER: &str = "vmware-api-session-id";

/// 管理平面客户端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VimConfig {
    /// 连接超时（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// 请求超时（秒）
    ///
    /// 需要覆盖服务端等待型调用（如客户机 IP 等待）的长轮询预算。
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// 是否验证 SSL 证书
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
}

impl Default for VimConfig {
    fn default() -> Self {
        Self {
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
            verify_ssl: default_verify_ssl(),
        }
    }
}

impl VimConfig {
    pub fn connect_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.connect_timeout)
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout)
    }
}

// 默认值函数
fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    300
}

fn default_verify_ssl() -> bool {
    true
}

/// 登录响应
#[derive(Debug, Deserialize)]
struct SessionBody {
    token: String,
}

/// 错误响应体
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// 管理平面客户端
///
/// 持有与管理端点的认证连接。会话建立后内部状态只读，
/// 仅会话令牌存放在读写锁中，可安全地跨任务共享。
pub struct VimClient {
    /// API 基础 URL
    base_url: String,

    /// HTTP 客户端
    http_client: Client,

    /// 会话令牌
    session_token: Arc<RwLock<Option<String>>>,
}

impl VimClient {
    /// 创建新的管理平面客户端
    ///
    /// `server` 为管理端点地址（主机名或 `主机:端口`），
    /// 客户端访问 `https://{server}/vim/v1` 下的资源。
    /// 构造本身不发起任何网络请求。
    pub fn new(server: &str, config: VimConfig) -> Result<Self> {
        let base_url = format!("https://{}/vim/v1", server);
        url::Url::parse(&base_url)
            .map_err(|e| VimError::Config(format!("无效的管理端点地址 {}: {}", server, e)))?;

        let http_client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(|e| VimError::Http(e.to_string()))?;

        Ok(Self {
            base_url,
            http_client,
            session_token: Arc::new(RwLock::new(None)),
        })
    }

    /// 认证登录
    ///
    /// 以 Basic 认证创建远端会话并保存返回的会话令牌。
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        info!("管理平面登录: {}", username);

        let credentials =
            base64::engine::general_purpose::STANDARD.encode(format!("{}:{}", username, password));

        let response = self
            .http_client
            .post(format!("{}/session", self.base_url))
            .header("Authorization", format!("Basic {}", credentials))
            .send()
            .await
            .map_err(|e| VimError::Http(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(VimError::Auth("用户名或密码被拒绝".to_string()));
        }
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "无法读取错误响应".to_string());
            return Err(VimError::Api(status.as_u16(), text));
        }

        let session: SessionBody = response
            .json()
            .await
            .map_err(|e| VimError::Parse(e.to_string()))?;

        *self.session_token.write().await = Some(session.token);

        info!("管理平面登录成功");
        Ok(())
    }

    /// 注销登出
    ///
    /// 尽力删除远端会话，本地令牌总是被清除。
    pub async fn logout(&self) -> Result<()> {
        info!("管理平面登出");

        let token = self.session_token.write().await.take();
        if let Some(token) = token {
            let result = self
                .http_client
                .delete(format!("{}/session", self.base_url))
                .header(SESSION_HEADER, &token)
                .send()
                .await;
            if let Err(e) = result {
                warn!("删除远端会话失败: {}", e);
            }
        }

        Ok(())
    }

    /// 获取库存查询 API
    pub fn inventory(&self) -> InventoryApi<'_> {
        InventoryApi::new(self)
    }

    /// 获取虚拟机操作 API
    pub fn vm(&self) -> VmApi<'_> {
        VmApi::new(self)
    }

    /// 获取异步任务 API
    pub fn task(&self) -> TaskApi<'_> {
        TaskApi::new(self)
    }

    /// 发送 HTTP 请求并解码 JSON 响应
    pub(crate) async fn request<T: Serialize, R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<T>,
    ) -> Result<R> {
        let response = self.send(method, path, body).await?;
        response
            .json::<R>()
            .await
            .map_err(|e| VimError::Parse(e.to_string()))
    }

    /// 发送 HTTP 请求，忽略响应体
    pub(crate) async fn execute<T: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<T>,
    ) -> Result<()> {
        self.send(method, path, body).await?;
        Ok(())
    }

    /// 发送 HTTP 请求并检查状态码
    async fn send<T: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<T>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!("管理平面请求: {} {}", method, url);

        let token = self.session_token.read().await;
        let token_str = token
            .as_ref()
            .ok_or_else(|| VimError::Auth("未认证，请先登录".to_string()))?;

        let mut request = self
            .http_client
            .request(method, &url)
            .header(SESSION_HEADER, token_str)
            .header("Content-Type", "application/json");

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| VimError::Http(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "无法读取错误响应".to_string());
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|e| e.message)
            .unwrap_or(text);

        match status {
            StatusCode::UNAUTHORIZED => Err(VimError::Auth(message)),
            StatusCode::NOT_FOUND => Err(VimError::NotFound(message)),
            _ => {
                warn!("API 请求失败: {} - {}", status, message);
                Err(VimError::Api(status.as_u16(), message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vim_client_creation() {
        let client = VimClient::new("192.168.1.11", VimConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_vim_client_rejects_bad_server() {
        let client = VimClient::new("not a host name", VimConfig::default());
        assert!(matches!(client, Err(VimError::Config(_))));
    }
}
