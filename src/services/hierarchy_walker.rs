//! 层级遍历服务 - 业务能力层
//!
//! 只负责"发现下一层"：分类 → 等级/主题 → 题目链接。
//! 选择器不匹配时降级为空列表或占位名称，不报错。

use std::time::Duration;

use scraper::{Html, Selector};
use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::infrastructure::Navigator;
use crate::models::{Category, Topic};
use crate::services::site_selectors::{self as css, href, parse_selector, trimmed_text};

pub const UNKNOWN_LEVEL: &str = "Unknown Level";
pub const UNTITLED_TOPIC: &str = "Untitled";

pub struct HierarchyWalker {
    base_url: String,
    practice_url: String,
    category_timeout: Duration,
    listing_timeout: Duration,
    category_link: Selector,
    category_title: Selector,
    level_section: Selector,
    level_name: Selector,
    topic_card: Selector,
    topic_heading: Selector,
    problem_tile: Selector,
}

impl HierarchyWalker {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            base_url: config.base_url.clone(),
            practice_url: config.practice_url(),
            category_timeout: config.category_timeout(),
            listing_timeout: config.listing_timeout(),
            category_link: parse_selector(css::CATEGORY_LINK)?,
            category_title: parse_selector(css::CATEGORY_TITLE)?,
            level_section: parse_selector(css::LEVEL_SECTION)?,
            level_name: parse_selector(css::LEVEL_NAME)?,
            topic_card: parse_selector(css::TOPIC_CARD)?,
            topic_heading: parse_selector(css::TOPIC_HEADING)?,
            problem_tile: parse_selector(css::PROBLEM_TILE)?,
        })
    }

    /// 练习首页上的全部分类
    pub async fn get_categories<N: Navigator>(&self, navigator: &N) -> Result<Vec<Category>> {
        let html = navigator
            .fetch_html(&self.practice_url, css::CATEGORY_LINK, self.category_timeout)
            .await?;
        let categories = self.parse_categories(&html);
        debug!("发现 {} 个分类", categories.len());
        Ok(categories)
    }

    /// 分类页中的 (等级, 主题, 主题地址)
    pub async fn get_levels_and_topics<N: Navigator>(
        &self,
        navigator: &N,
        url: &str,
    ) -> Result<Vec<Topic>> {
        let html = navigator
            .fetch_html(url, css::LEVEL_SECTION, self.listing_timeout)
            .await?;
        let topics = self.parse_levels_and_topics(&html);
        debug!("{} 中发现 {} 个主题", url, topics.len());
        Ok(topics)
    }

    /// 主题页中的全部题目地址
    pub async fn get_topic_questions<N: Navigator>(
        &self,
        navigator: &N,
        url: &str,
    ) -> Result<Vec<String>> {
        let html = navigator
            .fetch_html(url, css::PROBLEM_TILE, self.listing_timeout)
            .await?;
        let links = self.parse_topic_questions(&html);
        debug!("{} 中发现 {} 道题目", url, links.len());
        Ok(links)
    }

    /// 缺少 href 或标题元素的卡片会被跳过
    pub fn parse_categories(&self, html: &str) -> Vec<Category> {
        let document = Html::parse_document(html);
        document
            .select(&self.category_link)
            .filter_map(|anchor| {
                let href = href(anchor)?;
                let title = anchor.select(&self.category_title).next()?;
                Some(Category::new(self.absolute(href), trimmed_text(title)))
            })
            .collect()
    }

    pub fn parse_levels_and_topics(&self, html: &str) -> Vec<Topic> {
        let document = Html::parse_document(html);
        let mut topics = Vec::new();

        for section in document.select(&self.level_section) {
            let level_name = section
                .select(&self.level_name)
                .next()
                .map(trimmed_text)
                .unwrap_or_else(|| UNKNOWN_LEVEL.to_string());

            for card in section.select(&self.topic_card) {
                let Some(topic_href) = href(card) else {
                    continue;
                };
                let topic_name = card
                    .select(&self.topic_heading)
                    .next()
                    .map(trimmed_text)
                    .unwrap_or_else(|| UNTITLED_TOPIC.to_string());

                topics.push(Topic::new(
                    level_name.clone(),
                    topic_name,
                    self.absolute(topic_href),
                ));
            }
        }

        topics
    }

    pub fn parse_topic_questions(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        document
            .select(&self.problem_tile)
            .filter_map(href)
            .map(|h| self.absolute(h))
            .collect()
    }

    fn absolute(&self, href: &str) -> String {
        format!("{}{}", self.base_url, href)
    }
}
