//! 后端可达性探测
//! 按序探测候选端点，首个有效应答即判定在线

use reqwest::{Client, Method};
use std::fmt;
use std::time::Duration;
use tracing::debug;
use url::{Position, Url};

/// 后端可达状态
///
/// 界面态，不持久化；只由健康探测得出，
/// 从不凭单次失败的业务调用推断
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendAvailability {
    /// 探测进行中
    Checking,
    /// 任一候选端点应答
    Online,
    /// 所有候选端点均不可达
    Offline,
}

impl BackendAvailability {
    /// 由探测结果得到状态
    pub fn from_probe(reachable: bool) -> Self {
        if reachable {
            BackendAvailability::Online
        } else {
            BackendAvailability::Offline
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, BackendAvailability::Online)
    }
}

impl fmt::Display for BackendAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BackendAvailability::Checking => "checking",
            BackendAvailability::Online => "online",
            BackendAvailability::Offline => "offline",
        };
        f.write_str(label)
    }
}

/// 探测目标
#[derive(Debug, Clone)]
pub struct ProbeTarget {
    /// 目标名称（用于日志）
    pub name: &'static str,
    /// 完整 URL
    pub url: String,
}

/// 构造按优先级排序的探测目标列表
///
/// 先探测登录端点，再回退到服务根地址
pub fn probe_targets(base_url: &str) -> Vec<ProbeTarget> {
    let base = base_url.trim_end_matches('/');
    let mut targets = vec![ProbeTarget {
        name: "login_endpoint",
        url: format!("{}/auth/login", base),
    }];

    if let Ok(parsed) = Url::parse(base) {
        targets.push(ProbeTarget {
            name: "service_root",
            url: parsed[..Position::BeforePath].to_string(),
        });
    }

    targets
}

/// 按序探测候选端点
///
/// 使用 OPTIONS 请求，任一候选返回 5xx 以下状态即视为在线；
/// 全部连接失败视为离线。此函数从不返回错误。
pub async fn check_backend(client: &Client, base_url: &str, timeout: Duration) -> bool {
    for target in probe_targets(base_url) {
        match client
            .request(Method::OPTIONS, &target.url)
            .timeout(timeout)
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status().as_u16();
                if status < 500 {
                    debug!(target = target.name, status, "Backend probe answered");
                    return true;
                }
                debug!(target = target.name, status, "Backend probe returned server error");
            }
            Err(e) => {
                debug!(target = target.name, error = %e, "Backend probe failed");
            }
        }
    }

    false
}
