use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::error::{Result, ScrapeError};

/// 默认配置文件名（可通过 SCRAPER_CONFIG 覆盖）
pub const DEFAULT_CONFIG_FILE: &str = "scraper.toml";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/113.0.0.0 Safari/537.36";

/// 程序配置
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// 站点根地址，所有相对 href 都拼接在它后面
    pub base_url: String,
    /// 练习首页（分类列表）路径
    pub practice_path: String,
    /// 登录页路径
    pub login_path: String,
    /// 数据根目录
    pub data_dir: PathBuf,
    /// 会话文件名（相对 data_dir）
    pub storage_state_file: String,
    /// 是否无头模式（手动登录时必须可见）
    pub headless: bool,
    /// 浏览器可执行文件路径，为空时由 chromiumoxide 自动查找
    pub chrome_executable: Option<PathBuf>,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub device_scale_factor: f64,
    pub user_agent: String,
    /// 分类列表页等待上限
    pub category_timeout_ms: u64,
    /// 等级/主题页、主题题目页等待上限
    pub listing_timeout_ms: u64,
    /// 题目详情页等待上限
    pub question_timeout_ms: u64,
    /// 轮询 ready 选择器的间隔
    pub poll_interval_ms: u64,
    /// 文件名取标题的前多少个字符
    pub title_max_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://www.interviewbit.com".to_string(),
            practice_path: "/practice/".to_string(),
            login_path: "/users/sign_in/".to_string(),
            data_dir: PathBuf::from("data"),
            storage_state_file: "storage_state.json".to_string(),
            headless: false,
            chrome_executable: None,
            viewport_width: 1280,
            viewport_height: 800,
            device_scale_factor: 1.0,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            category_timeout_ms: 3000,
            listing_timeout_ms: 2000,
            question_timeout_ms: 3000,
            poll_interval_ms: 250,
            title_max_chars: 50,
        }
    }
}

/// TOML 覆盖层，所有字段可选
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    base_url: Option<String>,
    practice_path: Option<String>,
    login_path: Option<String>,
    data_dir: Option<PathBuf>,
    storage_state_file: Option<String>,
    headless: Option<bool>,
    chrome_executable: Option<PathBuf>,
    viewport_width: Option<u32>,
    viewport_height: Option<u32>,
    device_scale_factor: Option<f64>,
    user_agent: Option<String>,
    category_timeout_ms: Option<u64>,
    listing_timeout_ms: Option<u64>,
    question_timeout_ms: Option<u64>,
    poll_interval_ms: Option<u64>,
    title_max_chars: Option<usize>,
}

impl Config {
    /// 默认值 ← 配置文件（如存在）← 环境变量
    pub fn load() -> Result<Self> {
        let path = std::env::var("SCRAPER_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let base = Self::from_file_if_exists(Path::new(&path))?;
        Ok(base.with_env())
    }

    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// 读取 TOML 配置文件；文件不存在时返回默认配置
    pub fn from_file_if_exists(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ScrapeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| ScrapeError::Config(format!("{}: {}", path.display(), e)))?;
        info!("⚙️ 已加载配置文件: {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        let file: ConfigFile = toml::from_str(content)?;
        let d = Self::default();
        Ok(Self {
            base_url: file.base_url.unwrap_or(d.base_url),
            practice_path: file.practice_path.unwrap_or(d.practice_path),
            login_path: file.login_path.unwrap_or(d.login_path),
            data_dir: file.data_dir.unwrap_or(d.data_dir),
            storage_state_file: file.storage_state_file.unwrap_or(d.storage_state_file),
            headless: file.headless.unwrap_or(d.headless),
            chrome_executable: file.chrome_executable.or(d.chrome_executable),
            viewport_width: file.viewport_width.unwrap_or(d.viewport_width),
            viewport_height: file.viewport_height.unwrap_or(d.viewport_height),
            device_scale_factor: file.device_scale_factor.unwrap_or(d.device_scale_factor),
            user_agent: file.user_agent.unwrap_or(d.user_agent),
            category_timeout_ms: file.category_timeout_ms.unwrap_or(d.category_timeout_ms),
            listing_timeout_ms: file.listing_timeout_ms.unwrap_or(d.listing_timeout_ms),
            question_timeout_ms: file.question_timeout_ms.unwrap_or(d.question_timeout_ms),
            poll_interval_ms: file.poll_interval_ms.unwrap_or(d.poll_interval_ms),
            title_max_chars: file.title_max_chars.unwrap_or(d.title_max_chars),
        })
    }

    /// 环境变量覆盖；解析失败的数值保留原值
    fn with_env(self) -> Self {
        fn parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
            std::env::var(name).ok().and_then(|v| v.parse().ok())
        }

        Self {
            base_url: std::env::var("BASE_URL").unwrap_or(self.base_url),
            practice_path: std::env::var("PRACTICE_PATH").unwrap_or(self.practice_path),
            login_path: std::env::var("LOGIN_PATH").unwrap_or(self.login_path),
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(self.data_dir),
            storage_state_file: std::env::var("STORAGE_STATE_FILE")
                .unwrap_or(self.storage_state_file),
            headless: parsed("HEADLESS").unwrap_or(self.headless),
            chrome_executable: std::env::var("CHROME_EXECUTABLE")
                .ok()
                .map(PathBuf::from)
                .or(self.chrome_executable),
            viewport_width: parsed("VIEWPORT_WIDTH").unwrap_or(self.viewport_width),
            viewport_height: parsed("VIEWPORT_HEIGHT").unwrap_or(self.viewport_height),
            device_scale_factor: parsed("DEVICE_SCALE_FACTOR")
                .unwrap_or(self.device_scale_factor),
            user_agent: std::env::var("USER_AGENT").unwrap_or(self.user_agent),
            category_timeout_ms: parsed("CATEGORY_TIMEOUT_MS")
                .unwrap_or(self.category_timeout_ms),
            listing_timeout_ms: parsed("LISTING_TIMEOUT_MS").unwrap_or(self.listing_timeout_ms),
            question_timeout_ms: parsed("QUESTION_TIMEOUT_MS")
                .unwrap_or(self.question_timeout_ms),
            poll_interval_ms: parsed("POLL_INTERVAL_MS").unwrap_or(self.poll_interval_ms),
            title_max_chars: parsed("TITLE_MAX_CHARS").unwrap_or(self.title_max_chars),
        }
    }

    pub fn practice_url(&self) -> String {
        self.absolute_url(&self.practice_path)
    }

    pub fn login_url(&self) -> String {
        self.absolute_url(&self.login_path)
    }

    /// 站点根地址 + 相对路径（原样拼接）
    pub fn absolute_url(&self, href: &str) -> String {
        format!("{}{}", self.base_url, href)
    }

    pub fn storage_state_path(&self) -> PathBuf {
        self.data_dir.join(&self.storage_state_file)
    }

    pub fn category_timeout(&self) -> Duration {
        Duration::from_millis(self.category_timeout_ms)
    }

    pub fn listing_timeout(&self) -> Duration {
        Duration::from_millis(self.listing_timeout_ms)
    }

    pub fn question_timeout(&self) -> Duration {
        Duration::from_millis(self.question_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
