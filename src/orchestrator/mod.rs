//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用生命周期
//! - 启动浏览器、获取会话、关闭浏览器
//! - 唯一持有浏览器资源的模块
//!
//! ### `crawler` - 层级抓取器
//! - 串行遍历 分类 → 等级/主题 → 题目
//! - 决定哪些失败只跳过、哪些失败终止
//! - 汇总统计信息
//!
//! ## 层次关系
//!
//! ```text
//! app (浏览器 + 会话)
//!     ↓
//! crawler (分类 / 主题 / 题目循环)
//!     ↓
//! services (能力层：walker / extractor / writer / session)
//!     ↓
//! infrastructure (基础设施：BrowserPage)
//! ```

pub mod app;
pub mod crawler;

// 重新导出主要类型
pub use app::App;
pub use crawler::{CrawlStats, Crawler};
