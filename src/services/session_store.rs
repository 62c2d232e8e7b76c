//! 会话存储服务 - 业务能力层
//!
//! 单槽位：一个文件只存一份会话，提供 load / save / clear

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, ScrapeError};
use crate::models::StorageState;

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// 读取会话；文件不存在返回 `None`，文件损坏返回错误
    pub fn load(&self) -> Result<Option<StorageState>> {
        if !self.exists() {
            debug!("会话文件不存在: {}", self.path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| ScrapeError::io(&self.path, e))?;
        let state = serde_json::from_str(&content).map_err(|e| ScrapeError::Session {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        Ok(Some(state))
    }

    /// 覆盖写入会话（2 空格缩进 JSON）
    pub fn save(&self, state: &StorageState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ScrapeError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json).map_err(|e| ScrapeError::io(&self.path, e))?;
        debug!(
            "会话已写入 {} ({} 个 cookie)",
            self.path.display(),
            state.cookies.len()
        );
        Ok(())
    }

    /// 删除会话文件；文件不存在时什么也不做
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ScrapeError::io(&self.path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NameValue, OriginStorage, StoredCookie};

    fn sample_state() -> StorageState {
        StorageState {
            cookies: vec![StoredCookie {
                name: "_session".into(),
                value: "abc".into(),
                domain: ".interviewbit.com".into(),
                path: "/".into(),
                expires: -1.0,
                http_only: true,
                secure: true,
                same_site: "Lax".into(),
            }],
            origins: vec![OriginStorage {
                origin: "https://www.interviewbit.com".into(),
                local_storage: vec![NameValue {
                    name: "k".into(),
                    value: "v".into(),
                }],
            }],
        }
    }

    #[test]
    fn test_load_missing_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("storage_state.json"));
        assert!(!store.exists());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_creates_parent_and_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("data").join("storage_state.json"));
        store.save(&sample_state()).unwrap();

        assert!(store.exists());
        assert_eq!(store.load().unwrap(), Some(sample_state()));

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\n  \"cookies\""));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("storage_state.json"));
        store.save(&StorageState::default()).unwrap();

        store.clear().unwrap();
        assert!(!store.exists());
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_a_session_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage_state.json");
        fs::write(&path, "not json").unwrap();

        let err = SessionStore::new(&path).load().unwrap_err();
        assert!(matches!(err, ScrapeError::Session { .. }));
    }
}
