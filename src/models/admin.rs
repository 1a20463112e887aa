//! 管理端负载模型
//! 字段与远端负载保持 camelCase 对应，缺失字段取默认值

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 仪表盘概览
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(default)]
    pub welcome_message: String,
    #[serde(default)]
    pub admin_name: String,
    /// 远端序列化的是不带时区的本地时间
    #[serde(default)]
    pub last_login: Option<NaiveDateTime>,
    #[serde(default)]
    pub total_bookings: u64,
    #[serde(default)]
    pub total_menu_items: u64,
    #[serde(default)]
    pub total_gallery_images: u64,
    #[serde(default)]
    pub total_blog_posts: u64,
}

/// 管理员个人资料
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub last_login: Option<NaiveDateTime>,
}
