//! 会话持久化
//! 令牌与会话记录成对写入、成对清除

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ApiError;
use crate::models::auth::Session;

/// 令牌文件名
const TOKEN_FILE: &str = "auth_token";
/// 会话记录文件名
const USER_FILE: &str = "admin_user.json";
/// 旧版登录标记文件名，本客户端只负责清除
const LEGACY_FLAG_FILE: &str = "is_admin_logged_in";

/// 本地会话存储
///
/// 不变式：令牌文件与会话记录文件要么同时存在，要么同时缺失
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// 创建指向给定目录的存储，目录在首次写入时创建
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 存储目录
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn user_path(&self) -> PathBuf {
        self.dir.join(USER_FILE)
    }

    fn legacy_flag_path(&self) -> PathBuf {
        self.dir.join(LEGACY_FLAG_FILE)
    }

    /// 持久化会话
    ///
    /// 先写临时文件再成对改名，任何失败路径都不会留下半写状态
    pub fn save(&self, session: &Session) -> Result<(), ApiError> {
        fs::create_dir_all(&self.dir).map_err(storage_err)?;

        let record =
            serde_json::to_string_pretty(session).map_err(|e| ApiError::Storage(e.to_string()))?;

        let token_tmp = self.dir.join(format!("{}.tmp", TOKEN_FILE));
        let user_tmp = self.dir.join(format!("{}.tmp", USER_FILE));

        let staged = fs::write(&token_tmp, session.token.as_bytes())
            .and_then(|_| fs::write(&user_tmp, record.as_bytes()));
        if let Err(e) = staged {
            let _ = fs::remove_file(&token_tmp);
            let _ = fs::remove_file(&user_tmp);
            return Err(storage_err(e));
        }

        if let Err(e) = fs::rename(&token_tmp, self.token_path()) {
            let _ = fs::remove_file(&token_tmp);
            let _ = fs::remove_file(&user_tmp);
            return Err(storage_err(e));
        }
        if let Err(e) = fs::rename(&user_tmp, self.user_path()) {
            // 回滚令牌文件，保持成对不变式
            let _ = fs::remove_file(self.token_path());
            let _ = fs::remove_file(&user_tmp);
            return Err(storage_err(e));
        }

        debug!(username = %session.username, "Session persisted");
        Ok(())
    }

    /// 读取令牌；缺失或为空返回 None
    pub fn token(&self) -> Option<String> {
        let raw = fs::read_to_string(self.token_path()).ok()?;
        let token = raw.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    /// 读取会话记录；缺失或无法解析返回 None，从不报错
    pub fn session(&self) -> Option<Session> {
        let raw = fs::read_to_string(self.user_path()).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(error = %e, "Stored session record is malformed, ignoring");
                None
            }
        }
    }

    /// 是否持有非空令牌
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// 清除全部会话状态（令牌、会话记录、旧版标记）
    ///
    /// 三个文件一并删除；文件本就不存在不算失败
    pub fn clear(&self) -> Result<(), ApiError> {
        let mut first_err: Option<io::Error> = None;

        for path in [self.token_path(), self.user_path(), self.legacy_flag_path()] {
            if let Err(e) = fs::remove_file(&path) {
                if e.kind() != io::ErrorKind::NotFound && first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }

        match first_err {
            None => Ok(()),
            Some(e) => Err(storage_err(e)),
        }
    }
}

fn storage_err(e: io::Error) -> ApiError {
    ApiError::Storage(e.to_string())
}
