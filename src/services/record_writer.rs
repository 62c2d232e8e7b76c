//! 题目写入服务 - 业务能力层
//!
//! 只负责"把一条 QuestionRecord 写成 JSON 文件"，不关心流程

use std::path::PathBuf;

use tokio::fs;
use tracing::debug;

use crate::error::{Result, ScrapeError};
use crate::models::QuestionRecord;

const ILLEGAL_PATH_CHARS: [char; 9] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// 去掉文件路径中不允许出现的字符 `\ / * ? : " < > |`，不做替换
pub fn sanitize(name: &str) -> String {
    name.chars().filter(|c| !ILLEGAL_PATH_CHARS.contains(c)).collect()
}

/// 题目写入服务
///
/// 目录结构：`<root>/<分类>/<主题>/<标题前 N 个字符>.json`
///
/// 不同题目的标题前缀相同时会写到同一个文件，后写入的覆盖先写入的。
pub struct RecordWriter {
    root: PathBuf,
    title_max_chars: usize,
}

impl RecordWriter {
    pub fn new(root: impl Into<PathBuf>, title_max_chars: usize) -> Self {
        Self {
            root: root.into(),
            title_max_chars,
        }
    }

    /// 分类/主题对应的目录
    pub fn topic_dir(&self, category: &str, topic: &str) -> PathBuf {
        self.root.join(sanitize(category)).join(sanitize(topic))
    }

    /// 由标题得到的文件名
    pub fn file_name(&self, title: &str) -> String {
        let prefix: String = sanitize(title).chars().take(self.title_max_chars).collect();
        format!("{}.json", prefix)
    }

    /// 写入一条记录，返回文件路径；同名文件直接覆盖
    pub async fn save(
        &self,
        record: &QuestionRecord,
        category: &str,
        topic: &str,
    ) -> Result<PathBuf> {
        let dir = self.topic_dir(category, topic);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| ScrapeError::io(&dir, e))?;

        let path = dir.join(self.file_name(&record.title));
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json)
            .await
            .map_err(|e| ScrapeError::io(&path, e))?;

        debug!("写入 {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_removes_exactly_illegal_chars() {
        assert_eq!(sanitize(r#"a\b/c*d?e:f"g<h>i|j"#), "abcdefghij");
        assert_eq!(sanitize("C:1"), "C1");
    }

    #[test]
    fn test_sanitize_keeps_clean_names_unchanged() {
        for name in ["Arrays", "Two Sum", "Level 1 - Math", "数组与字符串", "a.b_c-d (e) [f]", ""] {
            assert_eq!(sanitize(name), name);
        }
    }

    #[test]
    fn test_file_name_truncates_sanitized_title() {
        let writer = RecordWriter::new("data", 50);
        let title = "x".repeat(80);
        assert_eq!(writer.file_name(&title), format!("{}.json", "x".repeat(50)));

        // 先去非法字符再截断
        let title = format!("{}{}", "?".repeat(10), "y".repeat(60));
        assert_eq!(writer.file_name(&title), format!("{}.json", "y".repeat(50)));
    }

    #[test]
    fn test_file_name_counts_characters_not_bytes() {
        let writer = RecordWriter::new("data", 3);
        assert_eq!(writer.file_name("两数之和"), "两数之.json");
    }

    #[tokio::test]
    async fn test_save_writes_pretty_json_under_sanitized_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RecordWriter::new(dir.path(), 50);
        let record = QuestionRecord::new("Two Sum", "Given an array");

        let path = writer.save(&record, "C:1", "Arrays/Hashing").await.unwrap();

        assert_eq!(path, dir.path().join("C1").join("ArraysHashing").join("Two Sum.json"));
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            raw,
            "{\n  \"title\": \"Two Sum\",\n  \"question\": \"Given an array\"\n}"
        );
    }

    #[tokio::test]
    async fn test_shared_title_prefix_overwrites_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RecordWriter::new(dir.path(), 50);
        let prefix = "p".repeat(50);
        let first = QuestionRecord::new(format!("{}-first", prefix), "first body");
        let second = QuestionRecord::new(format!("{}-second", prefix), "second body");

        let first_path = writer.save(&first, "Cat", "Topic").await.unwrap();
        let second_path = writer.save(&second, "Cat", "Topic").await.unwrap();

        assert_eq!(first_path, second_path);
        let saved: QuestionRecord =
            serde_json::from_str(&std::fs::read_to_string(&second_path).unwrap()).unwrap();
        assert_eq!(saved, second);
    }
}
