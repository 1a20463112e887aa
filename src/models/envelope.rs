//! 统一响应信封
//! 远端服务的所有响应都包装在 {success, message, data, timestamp} 结构中

use serde::{Deserialize, Serialize};

/// 远端服务的统一响应信封
///
/// 按远端约定 `data` 仅在 `success` 为 true 时出现，
/// 但此约定不在本地强制，缺失时以 `None` 容忍
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResult<T> {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default)]
    pub timestamp: String,
}

impl<T> ApiResult<T> {
    /// 取出负载，消费信封
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}
