use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{Result, ScrapeError};

/// 启动浏览器进程，并在后台处理 CDP 事件
///
/// 返回浏览器句柄和事件循环任务；任务需要在关闭浏览器后结束。
pub async fn launch_browser(config: &Config) -> Result<(Browser, JoinHandle<()>)> {
    info!(
        "🚀 启动浏览器 ({})",
        if config.headless { "无头模式" } else { "可视模式" }
    );

    let mut builder = BrowserConfig::builder()
        .window_size(config.viewport_width, config.viewport_height)
        .viewport(None)
        .args(vec![
            "--disable-dev-shm-usage",                          // 防止共享内存不足
            "--disable-blink-features=AutomationControlled",    // 隐藏自动化指纹
        ]);

    builder = if config.headless {
        builder.new_headless_mode()
    } else {
        builder.with_head()
    };

    if let Some(path) = &config.chrome_executable {
        debug!("使用浏览器: {}", path.display());
        builder = builder.chrome_executable(path);
    }

    let browser_config = builder.build().map_err(|e| {
        error!("配置浏览器失败: {}", e);
        ScrapeError::Launch(e)
    })?;

    let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
        error!("启动浏览器失败: {}", e);
        ScrapeError::Launch(e.to_string())
    })?;
    debug!("浏览器启动成功");

    // 在后台处理浏览器事件
    let handler_task = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(Duration::from_millis(300)).await;

    Ok((browser, handler_task))
}
