//! 页面执行器 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"导航并取回渲染后 HTML"的能力

use std::time::Duration;

use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::error::{Result, ScrapeError};

/// 导航能力
///
/// 抓取流程只依赖这个 trait，测试时可以换成内存实现。
#[allow(async_fn_in_trait)]
pub trait Navigator {
    /// 打开 `url`，等待 `ready_selector` 出现（最多 `timeout`），返回当前页面 HTML
    ///
    /// 超时不算错误：返回此刻已有的标记，由解析端降级为空结果或占位值。
    async fn fetch_html(&self, url: &str, ready_selector: &str, timeout: Duration)
        -> Result<String>;
}

/// 浏览器页面
///
/// 职责：
/// - 持有唯一的 Page 资源，整个运行期间串行复用
/// - 不认识分类 / 主题 / 题目
/// - 不处理业务流程
pub struct BrowserPage {
    page: Page,
    poll_interval: Duration,
}

impl BrowserPage {
    pub fn new(page: Page, poll_interval: Duration) -> Self {
        Self {
            page,
            poll_interval,
        }
    }

    /// 获取 page 的引用（用于会话保存等操作）
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 导航到指定 URL
    pub async fn goto(&self, url: &str) -> Result<()> {
        debug!("导航到: {}", url);
        self.page
            .goto(url)
            .await
            .map_err(|source| ScrapeError::Navigation {
                url: url.to_string(),
                source,
            })?;
        Ok(())
    }

    /// 轮询等待选择器出现，返回是否在超时前找到
    pub async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> bool {
        let deadline = deadline_after(Instant::now(), timeout);
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return true;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                debug!("等待 {} 超时 ({:?})", selector, timeout);
                return false;
            }
            sleep(self.poll_interval).await;
        }
    }

    /// 当前页面的完整 HTML
    pub async fn content(&self) -> Result<String> {
        Ok(self.page.content().await?)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> Result<T> {
        let result = self.page.evaluate(js_code.into()).await?;
        Ok(result.into_value()?)
    }
}

/// 超时过大溢出时视为没有截止时间
fn deadline_after(now: Instant, timeout: Duration) -> Option<Instant> {
    now.checked_add(timeout)
}

impl Navigator for BrowserPage {
    async fn fetch_html(
        &self,
        url: &str,
        ready_selector: &str,
        timeout: Duration,
    ) -> Result<String> {
        self.goto(url).await?;
        self.wait_for_selector(ready_selector, timeout).await;
        self.content().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_adds_timeout() {
        let now = Instant::now();
        assert_eq!(
            deadline_after(now, Duration::from_millis(2000)),
            Some(now + Duration::from_millis(2000))
        );
    }

    #[test]
    fn test_huge_timeout_means_no_deadline() {
        assert_eq!(deadline_after(Instant::now(), Duration::MAX), None);
        assert_eq!(
            deadline_after(Instant::now(), Duration::from_millis(u64::MAX)),
            None
        );
    }
}
