use serde::{Deserialize, Serialize};

/// 页面上没有标题时的占位
pub const TITLE_NOT_FOUND: &str = "Title not found";

/// 题干提取失败的哨兵值，带此值的记录不会落盘
pub const CONTENT_NOT_FOUND: &str = "Question content not found.";

/// 单道题目的抓取结果，按 `{"title", "question"}` 写入磁盘
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub title: String,
    pub question: String,
}

impl QuestionRecord {
    pub fn new(title: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            question: question.into(),
        }
    }

    /// 题干是否为哨兵值
    pub fn is_content_missing(&self) -> bool {
        self.question == CONTENT_NOT_FOUND
    }
}
