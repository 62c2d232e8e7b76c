//! 题目提取服务 - 业务能力层
//!
//! 只负责"把一道题的页面变成 QuestionRecord"，是唯一自带错误边界的抓取操作：
//! 导航或解析失败时记录日志并返回 `None`，由调用方跳过。

use std::time::Duration;

use scraper::{Html, Selector};
use tracing::error;

use crate::config::Config;
use crate::error::Result;
use crate::infrastructure::Navigator;
use crate::models::{QuestionRecord, CONTENT_NOT_FOUND, TITLE_NOT_FOUND};
use crate::services::site_selectors::{self as css, parse_selector, stripped_text};

/// 一种提取方式：选中的第一个元素的去空白文本
pub struct ExtractionStrategy {
    css: &'static str,
    selector: Selector,
}

impl ExtractionStrategy {
    pub fn new(css: &'static str) -> Result<Self> {
        Ok(Self {
            css,
            selector: parse_selector(css)?,
        })
    }

    pub fn css(&self) -> &'static str {
        self.css
    }

    /// 元素不存在或文本为空时返回 `None`
    pub fn extract(&self, document: &Html) -> Option<String> {
        document
            .select(&self.selector)
            .next()
            .map(stripped_text)
            .filter(|text| !text.is_empty())
    }
}

/// 按顺序尝试，第一个非空结果胜出
pub fn first_match(strategies: &[ExtractionStrategy], document: &Html) -> Option<String> {
    strategies.iter().find_map(|s| s.extract(document))
}

pub struct QuestionExtractor {
    title_strategies: Vec<ExtractionStrategy>,
    body_strategies: Vec<ExtractionStrategy>,
    timeout: Duration,
}

impl QuestionExtractor {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            title_strategies: vec![ExtractionStrategy::new(css::QUESTION_TITLE)?],
            body_strategies: vec![
                ExtractionStrategy::new(css::QUESTION_DESCRIPTION)?,
                ExtractionStrategy::new(css::QUESTION_DESCRIPTION_FALLBACK)?,
            ],
            timeout: config.question_timeout(),
        })
    }

    /// 抓取一道题；任何失败都只记录日志并返回 `None`
    pub async fn scrape_question<N: Navigator>(
        &self,
        navigator: &N,
        url: &str,
    ) -> Option<QuestionRecord> {
        match navigator
            .fetch_html(url, css::QUESTION_TITLE, self.timeout)
            .await
        {
            Ok(html) => Some(self.parse_question(&html)),
            Err(e) => {
                error!("❌ 抓取 {} 出错: {}", url, e);
                None
            }
        }
    }

    pub fn parse_question(&self, html: &str) -> QuestionRecord {
        let document = Html::parse_document(html);
        let title = first_match(&self.title_strategies, &document)
            .unwrap_or_else(|| TITLE_NOT_FOUND.to_string());
        let question = first_match(&self.body_strategies, &document)
            .unwrap_or_else(|| CONTENT_NOT_FOUND.to_string());
        QuestionRecord { title, question }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> QuestionExtractor {
        QuestionExtractor::new(&Config::default()).unwrap()
    }

    #[test]
    fn test_primary_description_wins() {
        let html = r#"
            <h1> Two   Sum </h1>
            <div class="question-description"><p>Given an array</p> <p>find two numbers.</p></div>
            <div class="css-1jjp8jh">fallback text</div>
        "#;

        let record = extractor().parse_question(html);
        assert_eq!(record.title, "Two   Sum");
        assert_eq!(record.question, "Given an arrayfind two numbers.");
        assert!(!record.is_content_missing());
    }

    #[test]
    fn test_falls_back_to_secondary_selector() {
        let html = r#"<h1>Rotate Matrix</h1><div class="css-1jjp8jh"> Rotate it by 90 degrees. </div>"#;
        let record = extractor().parse_question(html);
        assert_eq!(record.question, "Rotate it by 90 degrees.");
    }

    #[test]
    fn test_empty_primary_does_not_shadow_fallback() {
        let html = r#"<div class="question-description">   </div><div class="css-1jjp8jh">body</div>"#;
        assert_eq!(extractor().parse_question(html).question, "body");
    }

    #[test]
    fn test_inline_script_and_style_are_not_part_of_the_text() {
        let html = r#"
            <h1>Sum<script>var x=1;</script></h1>
            <div class="css-1jjp8jh"><style data-emotion="css abc">.css-abc{color:red;}</style><p>Add two numbers.</p></div>
        "#;

        let record = extractor().parse_question(html);
        assert_eq!(record.title, "Sum");
        assert_eq!(record.question, "Add two numbers.");
    }

    #[test]
    fn test_missing_elements_produce_placeholders() {
        let record = extractor().parse_question("<html><body></body></html>");
        assert_eq!(record.title, TITLE_NOT_FOUND);
        assert_eq!(record.question, CONTENT_NOT_FOUND);
        assert!(record.is_content_missing());
    }

    #[test]
    fn test_strategy_order_is_preserved() {
        let extractor = extractor();
        let order: Vec<&str> = extractor.body_strategies.iter().map(|s| s.css()).collect();
        assert_eq!(order, vec![".question-description", ".css-1jjp8jh"]);
    }
}
