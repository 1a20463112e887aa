//! 统一错误模型
//! 定义客户端错误分类和对外提示消息

use thiserror::Error;

/// 客户端错误类型
///
/// 调用方按枚举分支处理，而不是匹配消息字符串
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// 请求未能到达服务器（DNS 解析失败、连接被拒）
    #[error("unable to connect to server")]
    Connectivity,

    /// 请求超出超时预算
    #[error("request timed out")]
    Timeout,

    /// 服务器可达但返回非 2xx 状态
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// 认证调用收到 401，本地会话已被强制清除
    #[error("session expired, please sign in again")]
    SessionExpired,

    /// 响应体不是可解析的 JSON
    #[error("invalid response from server")]
    Malformed,

    /// 本地会话存储读写失败
    #[error("session storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// 根据状态码与响应体中的消息构造远端错误
    ///
    /// 响应体不可解析或消息为空时回退到按状态码生成的通用消息
    pub fn remote(status: u16, body_message: Option<String>) -> Self {
        let message = body_message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("server error {}", status));

        ApiError::Remote { status, message }
    }

    /// 获取用户友好的错误消息（不包含敏感信息）
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Connectivity => {
                "Unable to connect to server. Please check that the backend is running.".to_string()
            }
            ApiError::Timeout => "Request timed out. Please try again.".to_string(),
            ApiError::Remote { message, .. } => message.clone(),
            ApiError::SessionExpired => {
                "Your session has expired. Please sign in again.".to_string()
            }
            ApiError::Malformed => "Received an invalid response from the server.".to_string(),
            ApiError::Storage(_) => "Failed to access the local session store.".to_string(),
        }
    }

    /// 获取错误码（稳定的机器可读标识）
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Connectivity => "CONNECTIVITY_ERROR",
            ApiError::Timeout => "TIMEOUT_ERROR",
            ApiError::Remote { .. } => "REMOTE_ERROR",
            ApiError::SessionExpired => "SESSION_EXPIRED",
            ApiError::Malformed => "MALFORMED_RESPONSE",
            ApiError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// 失败后是否值得用户直接重试
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Connectivity | ApiError::Timeout)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Malformed
        } else {
            ApiError::Connectivity
        }
    }
}

pub type Result<T, E = ApiError> = std::result::Result<T, E>;
