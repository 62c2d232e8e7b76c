//! 站点层级：分类 → 等级/主题 → 题目链接

/// 练习分类（列表页上的一张课程卡片）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// 绝对地址
    pub url: String,
    pub name: String,
}

impl Category {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }
}

/// 分类页中某个等级下的一个主题
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub level_name: String,
    pub topic_name: String,
    /// 绝对地址
    pub topic_url: String,
}

impl Topic {
    pub fn new(
        level_name: impl Into<String>,
        topic_name: impl Into<String>,
        topic_url: impl Into<String>,
    ) -> Self {
        Self {
            level_name: level_name.into(),
            topic_name: topic_name.into(),
            topic_url: topic_url.into(),
        }
    }
}
