//! 应用生命周期 - 编排层
//!
//! 1. **初始化**：创建数据目录、启动浏览器、获取已登录的会话
//! 2. **运行**：委托 `Crawler` 完成整站遍历
//! 3. **清理**：无论遍历结果如何，关闭浏览器后再返回
//!
//! 只有本模块持有 `BrowsingContext` 和共享的 `BrowserPage`。

use anyhow::{Context, Result};
use tracing::warn;

use crate::browser::{launch_browser, BrowsingContext};
use crate::config::Config;
use crate::infrastructure::BrowserPage;
use crate::orchestrator::{CrawlStats, Crawler};
use crate::services::SessionManager;
use crate::utils::logging;

/// 应用主结构
pub struct App {
    config: Config,
    context: BrowsingContext,
    page: BrowserPage,
    crawler: Crawler,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config);

        std::fs::create_dir_all(&config.data_dir)
            .with_context(|| format!("无法创建数据目录: {}", config.data_dir.display()))?;

        let crawler = Crawler::new(&config).context("初始化抓取器失败")?;

        let (browser, handler_task) = launch_browser(&config).await?;
        let context = SessionManager::new(&config)
            .acquire_context(browser, handler_task)
            .await
            .context("获取登录会话失败")?;

        let page = BrowserPage::new(context.new_page().await?, config.poll_interval());

        Ok(Self {
            config,
            context,
            page,
            crawler,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(self) -> Result<CrawlStats> {
        let result = self.crawler.run(&self.page).await;

        drop(self.page);
        if let Err(e) = self.context.close().await {
            warn!("⚠️ 关闭浏览器失败: {}", e);
        }

        let stats = result?;
        logging::print_final_stats(&stats, &self.config);
        Ok(stats)
    }
}
