//! 测试公共模块
//! 提供内存模拟后端与测试配置

#![allow(dead_code)]

use axum::Router;
use basecamp_console::config::{ApiConfig, AppConfig, LoggingConfig, SessionConfig};
use basecamp_console::models::auth::Session;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// 启动模拟后端，返回其基础地址（含 /api 前缀）
pub async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}/api", addr)
}

/// 占用后立即释放一个本地端口，得到必然连接失败的地址
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{}/api", addr)
}

/// 创建指向给定后端的测试配置，会话目录按测试名隔离
pub fn create_test_config(base_url: &str, tag: &str) -> AppConfig {
    AppConfig {
        api: ApiConfig {
            base_url: base_url.to_string(),
            request_timeout_secs: 2,
            logout_timeout_secs: 1,
            probe_timeout_secs: 1,
        },
        session: SessionConfig {
            dir: test_session_dir(tag),
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
    }
}

/// 每个测试独立的会话目录，创建前先清空残留
pub fn test_session_dir(tag: &str) -> String {
    let dir = std::env::temp_dir().join(format!(
        "basecamp-console-it-{}-{}",
        tag,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir.to_string_lossy().to_string()
}

/// 标准管理员会话
pub fn admin_session() -> Session {
    Session {
        token: "abc123".to_string(),
        token_type: "Bearer".to_string(),
        username: "admin".to_string(),
        email: "a@x.com".to_string(),
        full_name: "Admin".to_string(),
        role: "ADMIN".to_string(),
    }
}

/// 标准成功登录信封
pub fn login_success_body() -> Value {
    json!({
        "success": true,
        "message": "Login successful",
        "data": {
            "token": "abc123",
            "type": "Bearer",
            "username": "admin",
            "email": "a@x.com",
            "fullName": "Admin",
            "role": "ADMIN"
        },
        "timestamp": "2025-06-01T10:00:00"
    })
}

/// 业务失败信封（无 data）
pub fn error_body(message: &str) -> Value {
    json!({
        "success": false,
        "message": message,
        "timestamp": "2025-06-01T10:00:00"
    })
}
