//! 远端认证/管理 API 客户端

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{ApiError, Result};
use crate::health;
use crate::models::admin::{AdminProfile, DashboardSummary};
use crate::models::auth::{Credentials, ForgotPasswordRequest, ResetPasswordRequest, Session};
use crate::models::envelope::ApiResult;
use crate::session::SessionStore;

/// 认证会话客户端
///
/// 独占本地会话存储；所有远端交互都经过这里
pub struct AuthSessionClient {
    http: Client,
    base_url: String,
    request_timeout: Duration,
    logout_timeout: Duration,
    probe_timeout: Duration,
    store: SessionStore,
}

impl AuthSessionClient {
    /// 创建新的客户端
    pub fn new(config: &AppConfig) -> Self {
        let http = Client::builder().build().unwrap();

        Self {
            http,
            base_url: config.base_url(),
            request_timeout: config.request_timeout(),
            logout_timeout: config.logout_timeout(),
            probe_timeout: config.probe_timeout(),
            store: SessionStore::new(&config.session.dir),
        }
    }

    /// 登录
    ///
    /// 成功且信封携带令牌时，先持久化会话再返回；
    /// 任何失败路径都不会写入部分状态
    pub async fn login(&self, credentials: &Credentials) -> Result<ApiResult<Session>> {
        let request_id = Uuid::new_v4();
        debug!(%request_id, username = %credentials.username, "Login request");

        let response = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .timeout(self.request_timeout)
            .json(credentials)
            .send()
            .await?;

        let envelope: ApiResult<Session> = read_envelope(response).await?;

        if envelope.success {
            match envelope.data.as_ref() {
                Some(session) if !session.token.is_empty() => {
                    self.store.save(session)?;
                    info!(username = %session.username, "Login successful, session persisted");
                }
                _ => {
                    warn!("Login reported success without a token, session not persisted");
                }
            }
        }

        Ok(envelope)
    }

    /// 登出
    ///
    /// 远端调用尽力而为，网络失败只记录日志；
    /// 无论远端结果如何，本地状态总是被清除
    pub async fn logout(&self) -> Result<()> {
        let mut request = self
            .http
            .post(format!("{}/auth/logout", self.base_url))
            .timeout(self.logout_timeout);
        if let Some(token) = self.store.token() {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Remote logout acknowledged");
            }
            Ok(response) => {
                warn!(status = %response.status(), "Remote logout rejected");
            }
            Err(e) => {
                warn!(error = %e, "Remote logout failed");
            }
        }

        self.store.clear()?;
        info!("Local session cleared");
        Ok(())
    }

    /// 发送重置密码邮件
    pub async fn forgot_password(&self, email: &str) -> Result<ApiResult<String>> {
        let response = self
            .http
            .post(format!("{}/auth/forgot-password", self.base_url))
            .timeout(self.request_timeout)
            .json(&ForgotPasswordRequest {
                email: email.to_string(),
            })
            .send()
            .await?;

        read_envelope(response).await
    }

    /// 用重置令牌设置新密码
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<ApiResult<String>> {
        let response = self
            .http
            .post(format!("{}/auth/reset-password", self.base_url))
            .timeout(self.request_timeout)
            .json(&ResetPasswordRequest {
                token: token.to_string(),
                new_password: new_password.to_string(),
            })
            .send()
            .await?;

        read_envelope(response).await
    }

    /// 校验重置令牌是否仍然有效
    pub async fn validate_reset_token(&self, token: &str) -> Result<ApiResult<bool>> {
        let response = self
            .http
            .get(format!("{}/auth/validate-reset-token", self.base_url))
            .timeout(self.request_timeout)
            .query(&[("token", token)])
            .send()
            .await?;

        read_envelope(response).await
    }

    /// 获取仪表盘概览
    pub async fn dashboard(&self) -> Result<ApiResult<DashboardSummary>> {
        self.authed_get("/admin/dashboard").await
    }

    /// 获取管理员资料
    pub async fn profile(&self) -> Result<ApiResult<AdminProfile>> {
        self.authed_get("/admin/profile").await
    }

    /// 是否已认证（只读本地状态，不发起网络调用）
    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    /// 读取已存储的会话记录；缺失或损坏返回 None
    pub fn stored_user(&self) -> Option<Session> {
        self.store.session()
    }

    /// 探测后端可达性，从不报错
    pub async fn check_backend_health(&self) -> bool {
        health::check_backend(&self.http, &self.base_url, self.probe_timeout).await
    }

    /// 发起带令牌的 GET 请求
    ///
    /// 收到 401 时先强制清除本地会话，再返回会话过期错误
    async fn authed_get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResult<T>> {
        let request_id = Uuid::new_v4();
        debug!(%request_id, path, "Authenticated request");

        let mut request = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .timeout(self.request_timeout);
        if let Some(token) = self.store.token() {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(path, "Authenticated call rejected with 401, clearing local session");
            self.logout().await?;
            return Err(ApiError::SessionExpired);
        }

        read_envelope(response).await
    }
}

/// 读取统一信封
///
/// 非 2xx 时尝试从响应体解析结构化错误消息，
/// 解析失败则回退到按状态码生成的通用消息
async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<ApiResult<T>> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiResult<serde_json::Value>>(&body)
            .ok()
            .map(|envelope| envelope.message);
        return Err(ApiError::remote(status.as_u16(), message));
    }

    response.json::<ApiResult<T>>().await.map_err(ApiError::from)
}
