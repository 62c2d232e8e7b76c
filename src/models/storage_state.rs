//! 会话快照（cookies + localStorage）
//!
//! 与 Playwright 的 `storage_state.json` 结构保持一致，旧文件可以直接复用。

use chromiumoxide::cdp::browser_protocol::network::{
    Cookie, CookieParam, CookieSameSite, TimeSinceEpoch,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageState {
    #[serde(default)]
    pub cookies: Vec<StoredCookie>,
    #[serde(default)]
    pub origins: Vec<OriginStorage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    /// 秒级时间戳，-1 表示会话 cookie
    #[serde(default = "session_expiry")]
    pub expires: f64,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub secure: bool,
    #[serde(default = "default_same_site")]
    pub same_site: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginStorage {
    pub origin: String,
    #[serde(default)]
    pub local_storage: Vec<NameValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameValue {
    pub name: String,
    pub value: String,
}

fn session_expiry() -> f64 {
    -1.0
}

fn default_same_site() -> String {
    "Lax".to_string()
}

impl StorageState {
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty() && self.origins.iter().all(|o| o.local_storage.is_empty())
    }
}

impl From<&Cookie> for StoredCookie {
    fn from(cookie: &Cookie) -> Self {
        let same_site = match cookie.same_site {
            Some(CookieSameSite::Strict) => "Strict",
            Some(CookieSameSite::None) => "None",
            _ => "Lax",
        };
        Self {
            name: cookie.name.clone(),
            value: cookie.value.clone(),
            domain: cookie.domain.clone(),
            path: cookie.path.clone(),
            expires: if cookie.session { -1.0 } else { cookie.expires },
            http_only: cookie.http_only,
            secure: cookie.secure,
            same_site: same_site.to_string(),
        }
    }
}

impl StoredCookie {
    /// 转换为 CDP 的 `Network.setCookies` 参数
    pub fn to_param(&self) -> CookieParam {
        let mut param = CookieParam::new(self.name.clone(), self.value.clone());
        param.domain = Some(self.domain.clone());
        param.path = Some(self.path.clone());
        param.secure = Some(self.secure);
        param.http_only = Some(self.http_only);
        param.same_site = match self.same_site.as_str() {
            "Strict" => Some(CookieSameSite::Strict),
            "None" => Some(CookieSameSite::None),
            "Lax" => Some(CookieSameSite::Lax),
            _ => None,
        };
        if self.expires > 0.0 {
            param.expires = Some(TimeSinceEpoch::new(self.expires));
        }
        param
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_playwright_storage_state() {
        let raw = r#"{
            "cookies": [{
                "name": "_session",
                "value": "abc",
                "domain": ".interviewbit.com",
                "path": "/",
                "expires": 1893456000,
                "httpOnly": true,
                "secure": true,
                "sameSite": "None"
            }],
            "origins": [{
                "origin": "https://www.interviewbit.com",
                "localStorage": [{"name": "token", "value": "t"}]
            }]
        }"#;

        let state: StorageState = serde_json::from_str(raw).unwrap();
        assert_eq!(state.cookies.len(), 1);
        assert!(state.cookies[0].http_only);
        assert_eq!(state.origins[0].local_storage[0].name, "token");
        assert!(!state.is_empty());

        let param = state.cookies[0].to_param();
        assert_eq!(param.domain.as_deref(), Some(".interviewbit.com"));
        assert!(matches!(param.same_site, Some(CookieSameSite::None)));
        assert!(param.expires.is_some());
    }

    #[test]
    fn test_session_cookie_has_no_expiry_param() {
        let cookie = StoredCookie {
            name: "sid".into(),
            value: "1".into(),
            domain: "example.com".into(),
            path: "/".into(),
            expires: -1.0,
            http_only: false,
            secure: false,
            same_site: "Lax".into(),
        };
        assert!(cookie.to_param().expires.is_none());
    }

    #[test]
    fn test_serializes_camel_case_keys() {
        let state = StorageState {
            cookies: vec![],
            origins: vec![OriginStorage {
                origin: "https://a.test".into(),
                local_storage: vec![],
            }],
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"localStorage\""));
        assert!(state.is_empty());
    }
}
