//! 映射的持久化，支持跨次运行续做

use crate::error::{Error, Result};
use crate::row::ResolutionMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 以 JSON 文件保存的映射
#[derive(Debug, Clone)]
pub struct ResumableStore {
    path: PathBuf,
}

impl ResumableStore {
    /// 创建存储
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取上次保存的映射，文件不存在时返回 `None`
    pub fn load(&self) -> Result<Option<ResolutionMap>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.persistence_error(e)),
        };
        let map: ResolutionMap =
            serde_json::from_str(&raw).map_err(|e| self.persistence_error(e))?;
        debug!(path = %self.path.display(), entries = map.len(), "loaded previous progress");
        Ok(Some(map))
    }

    /// 完整覆盖写入映射
    ///
    /// 先写入同目录的临时文件再重命名，写入中途失败不会破坏已有文件。
    pub fn save(&self, map: &ResolutionMap) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.persistence_error(e))?;
        }

        let body = serde_json::to_string_pretty(map).map_err(|e| self.persistence_error(e))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).map_err(|e| self.persistence_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.persistence_error(e))?;

        debug!(path = %self.path.display(), entries = map.len(), "saved progress");
        Ok(())
    }

    fn persistence_error(&self, err: impl std::fmt::Display) -> Error {
        Error::Persistence(format!("{}: {}", self.path.display(), err))
    }
}
