//! 错误类型定义

use thiserror::Error;

/// 结果别名
pub type Result<T> = std::result::Result<T, Error>;

/// 地址整理过程中的错误
#[derive(Debug, Error)]
pub enum Error {
    /// 源数据表读取失败（文件缺失、损坏、缺少地址列）
    #[error("Failed to read address source: {0}")]
    SourceRead(String),

    /// 自动补全请求失败（连接、非 2xx、JSON 格式错误）
    #[error("Autocomplete request failed: {0}")]
    Network(String),

    /// 服务返回了非 OK / ZERO_RESULTS 状态
    #[error("Autocomplete service returned {status}: {message}")]
    Service { status: String, message: String },

    /// 控制台输入已关闭或不可读
    #[error("Operator input unavailable: {0}")]
    OperatorInput(String),

    /// 映射文件读写失败
    #[error("Failed to persist resolution map: {0}")]
    Persistence(String),

    /// 配置错误
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// 是否为远程服务相关的错误
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Service { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Error::Network(format!("HTTP {status}: {err}")),
            None => Error::Network(err.to_string()),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::SourceRead(err.to_string())
    }
}
