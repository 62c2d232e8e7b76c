use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::Page;
use tracing::debug;

use crate::config::Config;
use crate::error::Result;

/// 新会话使用的桌面设备画像
///
/// 目标站点对默认的自动化指纹返回不同页面，登录前必须伪装成普通桌面浏览器。
#[derive(Debug, Clone, PartialEq)]
pub struct PageProfile {
    pub width: u32,
    pub height: u32,
    pub device_scale_factor: f64,
    pub user_agent: String,
}

impl PageProfile {
    pub fn from_config(config: &Config) -> Self {
        Self {
            width: config.viewport_width,
            height: config.viewport_height,
            device_scale_factor: config.device_scale_factor,
            user_agent: config.user_agent.clone(),
        }
    }

    /// 应用到页面：视口、缩放比、非移动端、UA
    pub async fn apply(&self, page: &Page) -> Result<()> {
        debug!(
            "应用页面画像: {}x{} @{}",
            self.width, self.height, self.device_scale_factor
        );
        page.execute(SetDeviceMetricsOverrideParams::new(
            i64::from(self.width),
            i64::from(self.height),
            self.device_scale_factor,
            false,
        ))
        .await?;
        page.execute(SetUserAgentOverrideParams::new(self.user_agent.clone()))
            .await?;
        Ok(())
    }
}
