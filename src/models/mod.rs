//! 数据模型模块
//! 统一响应信封、认证模型与管理端负载

pub mod admin;
pub mod auth;
pub mod envelope;
