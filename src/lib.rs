//! # Practice Scraper
//!
//! 登录练习平台，按 分类 → 等级/主题 → 题目 的层级遍历，
//! 把每道题的标题和题干保存为 JSON 文件
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `browser/` - 启动浏览器、设备画像、浏览上下文
//! - `infrastructure/` - `BrowserPage`：唯一的 page owner，提供"导航并取回 HTML"能力
//!
//! ### ② 业务能力层（Services）
//! - `SessionStore` / `SessionManager` - 会话的保存、恢复与手动登录
//! - `HierarchyWalker` - 发现分类、等级/主题、题目链接
//! - `QuestionExtractor` - 提取单道题
//! - `RecordWriter` - 文件名净化与 JSON 写盘
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/app` - 资源生命周期
//! - `orchestrator/crawler` - 串行遍历与跳过策略
//!
//! ## 数据布局
//!
//! ```text
//! data/storage_state.json
//! data/<分类>/<主题>/<标题前 50 字符>.json
//! ```

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{Result, ScrapeError};
pub use infrastructure::{BrowserPage, Navigator};
pub use models::{Category, QuestionRecord, StorageState, Topic};
pub use orchestrator::{App, CrawlStats, Crawler};
