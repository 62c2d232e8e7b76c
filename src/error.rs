use std::path::PathBuf;

use thiserror::Error;

/// 抓取过程中的错误类型
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// 浏览器启动或配置失败
    #[error("启动浏览器失败: {0}")]
    Launch(String),

    /// 导航到页面失败
    #[error("导航到 {url} 失败: {source}")]
    Navigation {
        url: String,
        #[source]
        source: chromiumoxide::error::CdpError,
    },

    /// 其他 CDP 调用失败
    #[error("浏览器错误: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    /// 会话文件损坏或无法使用
    #[error("会话文件无效 ({path}): {message}")]
    Session { path: PathBuf, message: String },

    /// 文件读写失败
    #[error("文件操作失败 ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("配置错误: {0}")]
    Config(String),

    /// 读取操作员输入失败
    #[error("读取控制台输入失败: {0}")]
    Prompt(String),
}

impl ScrapeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScrapeError::Io {
            path: path.into(),
            source,
        }
    }
}

/// 库内部结果类型
pub type Result<T> = std::result::Result<T, ScrapeError>;
