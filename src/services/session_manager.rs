//! 会话管理服务 - 业务能力层
//!
//! 负责拿到一个已登录的浏览上下文：
//! 1. 存在会话文件 → 直接恢复
//! 2. 否则 → 打开登录页，等待操作员手动登录（含验证码），再保存会话

use chromiumoxide::Browser;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::browser::{BrowsingContext, PageProfile};
use crate::config::Config;
use crate::error::Result;
use crate::infrastructure::BrowserPage;
use crate::models::{OriginStorage, StorageState, StoredCookie};
use crate::services::SessionStore;
use crate::utils::prompt;

const LOGIN_PROMPT: &str = "✅ 登录完成、看到控制台首页后，在这里按 ENTER 继续...";

const CAPTURE_LOCAL_STORAGE_JS: &str = r#"
(() => ({
    origin: location.origin,
    localStorage: Object.keys(localStorage)
        .map(name => ({ name, value: localStorage.getItem(name) }))
}))()
"#;

/// 本次运行如何获得会话
#[derive(Debug, Clone, PartialEq)]
pub enum SessionPlan {
    /// 从会话文件恢复
    Restore(StorageState),
    /// 需要手动登录
    ManualLogin,
}

pub struct SessionManager<'a> {
    config: &'a Config,
    store: SessionStore,
}

impl<'a> SessionManager<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            store: SessionStore::new(config.storage_state_path()),
        }
    }

    /// 决定走恢复还是手动登录，不触碰浏览器
    pub fn plan(&self) -> Result<SessionPlan> {
        Ok(match self.store.load()? {
            Some(state) => SessionPlan::Restore(state),
            None => SessionPlan::ManualLogin,
        })
    }

    /// 获取已登录的浏览上下文
    pub async fn acquire_context(
        &self,
        browser: Browser,
        handler_task: JoinHandle<()>,
    ) -> Result<BrowsingContext> {
        let context = BrowsingContext::new(browser, handler_task);

        match self.plan()? {
            SessionPlan::Restore(state) => {
                self.restore(&context, &state).await?;
                info!("🍪 已从 {} 恢复会话", self.store.path().display());
                Ok(context)
            }
            SessionPlan::ManualLogin => {
                let context = context.with_profile(PageProfile::from_config(self.config));
                let state = self.manual_login(&context).await?;
                self.store.save(&state)?;
                info!("✅ 会话已保存至 {}", self.store.path().display());
                Ok(context)
            }
        }
    }

    async fn restore(&self, context: &BrowsingContext, state: &StorageState) -> Result<()> {
        context.set_cookies(&state.cookies).await?;

        let origins: Vec<&OriginStorage> = state
            .origins
            .iter()
            .filter(|o| !o.local_storage.is_empty())
            .collect();
        if origins.is_empty() {
            return Ok(());
        }

        let page = BrowserPage::new(context.new_page().await?, self.config.poll_interval());
        for origin in origins {
            page.goto(&origin.origin).await?;
            let js_code = format!(
                "(() => {{ const entries = {}; \
                 for (const e of entries) localStorage.setItem(e.name, e.value); \
                 return entries.length; }})()",
                serde_json::to_string(&origin.local_storage)?
            );
            let restored: usize = page.eval_as(js_code).await?;
            debug!("{} 恢复了 {} 项 localStorage", origin.origin, restored);
        }
        page.page().clone().close().await?;
        Ok(())
    }

    async fn manual_login(&self, context: &BrowsingContext) -> Result<StorageState> {
        let page = BrowserPage::new(context.new_page().await?, self.config.poll_interval());
        page.goto(&self.config.login_url()).await?;

        info!("🔓 请在浏览器中手动登录并完成验证码");
        prompt::wait_for_enter(LOGIN_PROMPT).await?;

        let cookies: Vec<StoredCookie> = context
            .cookies()
            .await?
            .iter()
            .map(StoredCookie::from)
            .collect();

        let mut origins = Vec::new();
        match page.eval_as::<OriginStorage>(CAPTURE_LOCAL_STORAGE_JS).await {
            Ok(origin) if origin.origin != "null" => origins.push(origin),
            Ok(_) => {}
            Err(e) => warn!("⚠️ 读取 localStorage 失败，仅保存 cookie: {}", e),
        }

        page.page().clone().close().await?;

        let state = StorageState { cookies, origins };
        if state.is_empty() {
            warn!("⚠️ 没有读取到任何 cookie，登录可能尚未完成");
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &std::path::Path) -> Config {
        Config {
            data_dir: dir.to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn test_plan_without_session_file_requires_manual_login() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let manager = SessionManager::new(&config);
        assert_eq!(manager.plan().unwrap(), SessionPlan::ManualLogin);
    }

    #[test]
    fn test_plan_with_session_file_restores_it_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let state = StorageState {
            cookies: vec![StoredCookie {
                name: "_session".into(),
                value: "abc".into(),
                domain: ".interviewbit.com".into(),
                path: "/".into(),
                expires: 1893456000.0,
                http_only: true,
                secure: true,
                same_site: "Lax".into(),
            }],
            origins: vec![],
        };
        SessionStore::new(config.storage_state_path()).save(&state).unwrap();

        let manager = SessionManager::new(&config);
        assert_eq!(manager.plan().unwrap(), SessionPlan::Restore(state));
    }
}
