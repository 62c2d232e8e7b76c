//! 浏览上下文：浏览器进程 + 可选的设备画像
//!
//! 只有编排层持有它；运行结束时由 `close()` 统一释放。

use chromiumoxide::cdp::browser_protocol::network::Cookie;
use chromiumoxide::{Browser, Page};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::browser::PageProfile;
use crate::error::Result;
use crate::models::StoredCookie;

pub struct BrowsingContext {
    browser: Browser,
    handler_task: JoinHandle<()>,
    profile: Option<PageProfile>,
}

impl BrowsingContext {
    pub fn new(browser: Browser, handler_task: JoinHandle<()>) -> Self {
        Self {
            browser,
            handler_task,
            profile: None,
        }
    }

    /// 之后新建的页面都会套用该画像
    pub fn with_profile(mut self, profile: PageProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub async fn new_page(&self) -> Result<Page> {
        let page = self.browser.new_page("about:blank").await?;
        if let Some(profile) = &self.profile {
            profile.apply(&page).await?;
        }
        Ok(page)
    }

    pub async fn cookies(&self) -> Result<Vec<Cookie>> {
        Ok(self.browser.get_cookies().await?)
    }

    pub async fn set_cookies(&self, cookies: &[StoredCookie]) -> Result<()> {
        if cookies.is_empty() {
            return Ok(());
        }
        let params = cookies.iter().map(StoredCookie::to_param).collect();
        self.browser.set_cookies(params).await?;
        debug!("已写入 {} 个 cookie", cookies.len());
        Ok(())
    }

    /// 关闭浏览器并结束事件循环
    pub async fn close(mut self) -> Result<()> {
        self.browser.close().await?;
        if let Err(e) = self.browser.wait().await {
            warn!("等待浏览器进程退出失败: {}", e);
        }
        self.handler_task.abort();
        debug!("浏览器已关闭");
        Ok(())
    }
}
