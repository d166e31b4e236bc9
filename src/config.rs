//! 运行配置

use crate::error::{Error, Result};
use crate::narrow::{DEFAULT_MINIMUM, DEFAULT_TARGET};
use std::path::PathBuf;
use std::time::Duration;

/// 自动补全服务地址
pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/place/autocomplete/json";

/// 每次运行最多新增的行数
pub const DEFAULT_QUOTA: usize = 20;

/// 地址列名
pub const DEFAULT_ADDRESS_COLUMN: &str = "address";

/// 数据目录（位于用户主目录下）
pub const DATA_DIR: &str = "slopolice";

/// 运行配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// 原始地址 CSV 文件
    pub source_path: PathBuf,
    /// 映射保存位置
    pub store_path: PathBuf,
    /// 地址列名
    pub address_column: String,
    /// 自动补全服务地址
    pub endpoint: String,
    /// 服务凭据
    pub api_key: Option<String>,
    /// 每次运行最多新增的行数
    pub quota: usize,
    /// 请求超时，`None` 表示一直等待
    pub request_timeout: Option<Duration>,
    /// 收窄规则的目标短语
    pub narrow_target: String,
    /// 收窄规则的最短截断
    pub narrow_minimum: String,
}

impl Config {
    /// 以 `home` 为主目录的默认配置
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        let dir = home.into().join(DATA_DIR);
        Self {
            source_path: dir.join("cases.csv"),
            store_path: dir.join("converted_addresses.json"),
            address_column: DEFAULT_ADDRESS_COLUMN.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            quota: DEFAULT_QUOTA,
            request_timeout: None,
            narrow_target: DEFAULT_TARGET.to_string(),
            narrow_minimum: DEFAULT_MINIMUM.to_string(),
        }
    }

    /// 从进程环境变量读取
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取，未设置的项使用默认值
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let home = lookup("HOME")
            .filter(|h| !h.is_empty())
            .ok_or_else(|| Error::Config("HOME is not set".into()))?;
        let mut config = Self::with_home(home);

        if let Some(path) = lookup("SLO_ADDRESS_SOURCE") {
            config.source_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("SLO_ADDRESS_STORE") {
            config.store_path = PathBuf::from(path);
        }
        if let Some(column) = lookup("SLO_ADDRESS_COLUMN") {
            config.address_column = column;
        }
        if let Some(endpoint) = lookup("SLO_ADDRESS_ENDPOINT") {
            config.endpoint = endpoint;
        }
        config.api_key = lookup("SLO_ADDRESS_API_KEY").filter(|k| !k.trim().is_empty());
        if let Some(quota) = lookup("SLO_ADDRESS_QUOTA") {
            config.quota = quota
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("SLO_ADDRESS_QUOTA: '{quota}' is not a count")))?;
        }
        if let Some(secs) = lookup("SLO_ADDRESS_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::Config(format!("SLO_ADDRESS_TIMEOUT_SECS: '{secs}' is not a number"))
            })?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// 获取凭据，未配置时报错
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| Error::Config("SLO_ADDRESS_API_KEY is not set".into()))
    }
}
