//! 配置系统
//! 从环境变量加载所有配置

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// 远端 API 配置
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// 远端服务基础地址，例如 "http://localhost:8080/api"
    pub base_url: String,
    /// 常规请求超时（秒）
    pub request_timeout_secs: u64,
    /// 登出请求超时（秒），尽力而为的调用使用更短的预算
    pub logout_timeout_secs: u64,
    /// 健康探测单次超时（秒）
    pub probe_timeout_secs: u64,
}

/// 会话存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// 会话文件存放目录
    pub dir: String,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// 默认会话目录：用户主目录下的隐藏目录，取不到主目录时退回当前目录
fn default_session_dir() -> String {
    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() => format!("{}/.basecamp-console", home),
        _ => ".basecamp-console".to_string(),
    }
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Config::builder();

        // 添加默认配置
        settings = settings
            .set_default("api.base_url", "http://localhost:8080/api")?
            .set_default("api.request_timeout_secs", 10)?
            .set_default("api.logout_timeout_secs", 5)?
            .set_default("api.probe_timeout_secs", 3)?
            .set_default("session.dir", default_session_dir())?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?;

        // 从环境变量加载配置（前缀为 BASECAMP_）
        settings = settings.add_source(
            Environment::with_prefix("BASECAMP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = settings.build()?.try_deserialize()?;

        // 验证配置
        config.validate()?;

        Ok(config)
    }

    /// 验证配置合法性
    fn validate(&self) -> Result<(), ConfigError> {
        // 验证基础地址
        let parsed = Url::parse(&self.api.base_url)
            .map_err(|e| ConfigError::Message(format!("Invalid api.base_url: {}", e)))?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ConfigError::Message(format!(
                    "Invalid api.base_url scheme: {}. Must be http or https",
                    other
                )))
            }
        }
        if parsed.host_str().is_none() {
            return Err(ConfigError::Message(
                "api.base_url must include a host".to_string(),
            ));
        }

        // 验证超时预算
        for (name, value) in [
            ("api.request_timeout_secs", self.api.request_timeout_secs),
            ("api.logout_timeout_secs", self.api.logout_timeout_secs),
            ("api.probe_timeout_secs", self.api.probe_timeout_secs),
        ] {
            if value == 0 || value > 300 {
                return Err(ConfigError::Message(format!(
                    "{} must be between 1 and 300",
                    name
                )));
            }
        }

        // 验证会话目录
        if self.session.dir.trim().is_empty() {
            return Err(ConfigError::Message(
                "session.dir must not be empty".to_string(),
            ));
        }

        // 验证日志级别
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        // 验证日志格式
        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log format: {}. Must be one of: json, pretty",
                    self.logging.format
                )))
            }
        }

        Ok(())
    }

    /// 去除末尾斜杠后的基础地址
    pub fn base_url(&self) -> String {
        self.api.base_url.trim_end_matches('/').to_string()
    }

    /// 常规请求超时
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    /// 登出请求超时
    pub fn logout_timeout(&self) -> Duration {
        Duration::from_secs(self.api.logout_timeout_secs)
    }

    /// 健康探测单次超时
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.api.probe_timeout_secs)
    }
}
