//! 层级抓取器 - 编排层
//!
//! ## 职责
//!
//! 按 分类 → 等级/主题 → 题目 的顺序串行遍历，逐题提取并写盘。
//!
//! ## 错误边界
//!
//! - 获取分类失败：记录日志，整次抓取结束（不算进程失败）
//! - 某个分类的等级/主题获取失败：记录日志，继续下一个分类
//! - 某道题提取失败或题干为哨兵值：记录日志，跳过这道题
//! - 其他错误（主题题目列表、写文件）直接向上传播

use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::infrastructure::Navigator;
use crate::models::{Category, Topic};
use crate::services::{HierarchyWalker, QuestionExtractor, RecordWriter};

/// 抓取统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlStats {
    /// 成功进入的分类数
    pub categories: usize,
    /// 等级/主题获取失败的分类数
    pub failed_categories: usize,
    pub topics: usize,
    pub saved: usize,
    pub skipped: usize,
}

pub struct Crawler {
    walker: HierarchyWalker,
    extractor: QuestionExtractor,
    writer: RecordWriter,
}

impl Crawler {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            walker: HierarchyWalker::new(config)?,
            extractor: QuestionExtractor::new(config)?,
            writer: RecordWriter::new(&config.data_dir, config.title_max_chars),
        })
    }

    /// 完整遍历一次站点
    pub async fn run<N: Navigator>(&self, navigator: &N) -> Result<CrawlStats> {
        let mut stats = CrawlStats::default();

        let categories = match self.walker.get_categories(navigator).await {
            Ok(categories) => categories,
            Err(e) => {
                error!("❌ 获取分类失败: {}", e);
                return Ok(stats);
            }
        };
        info!("✓ 找到 {} 个分类", categories.len());

        for category in &categories {
            self.process_category(navigator, category, &mut stats).await?;
        }

        info!("🎉 抓取完成");
        Ok(stats)
    }

    async fn process_category<N: Navigator>(
        &self,
        navigator: &N,
        category: &Category,
        stats: &mut CrawlStats,
    ) -> Result<()> {
        info!("📁 进入分类: {}", category.name);

        let topics = match self
            .walker
            .get_levels_and_topics(navigator, &category.url)
            .await
        {
            Ok(topics) => topics,
            Err(e) => {
                error!("❌ 获取 {} 的等级/主题失败: {}", category.name, e);
                stats.failed_categories += 1;
                return Ok(());
            }
        };
        stats.categories += 1;

        for topic in &topics {
            self.process_topic(navigator, category, topic, stats).await?;
        }

        Ok(())
    }

    async fn process_topic<N: Navigator>(
        &self,
        navigator: &N,
        category: &Category,
        topic: &Topic,
        stats: &mut CrawlStats,
    ) -> Result<()> {
        info!("   🔹 {} ➤ {}", topic.level_name, topic.topic_name);
        stats.topics += 1;

        let question_links = self
            .walker
            .get_topic_questions(navigator, &topic.topic_url)
            .await?;

        for url in &question_links {
            let record = match self.extractor.scrape_question(navigator, url).await {
                Some(record) if !record.is_content_missing() => record,
                _ => {
                    warn!("⚠️ 跳过 {}", url);
                    stats.skipped += 1;
                    continue;
                }
            };

            let path = self
                .writer
                .save(&record, &category.name, &topic.topic_name)
                .await?;
            info!(
                "✅ 已保存: {}",
                path.file_name().unwrap_or_default().to_string_lossy()
            );
            stats.saved += 1;
        }

        Ok(())
    }
}
