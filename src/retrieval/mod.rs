//! 评论检索 - 加载评论数据集，按词元重合度打分，返回top-k带情感标签的上下文块

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;

use crate::types::{ContextChunk, ReviewRecord};

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+").unwrap());

/// 上下文提供方，为查询产出按相关性排序的情感标签上下文块
#[async_trait]
pub trait ContextSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<ContextChunk>>;
}

/// 内存评论库。启动时加载一次，之后只读。
pub struct ReviewStore {
    records: Vec<ReviewRecord>,
}

impl ReviewStore {
    /// 从JSON数据集文件加载评论库
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read review dataset: {:?}", path))?;
        let records: Vec<ReviewRecord> =
            serde_json::from_str(&content).context("Failed to parse review dataset")?;
        Ok(Self { records })
    }

    pub fn from_records(records: Vec<ReviewRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 提取查询词元：小写化后取字母数字序列，保序去重
    fn tokenize(query: &str) -> Vec<String> {
        let lowered = query.to_lowercase();
        let mut tokens: Vec<String> = Vec::new();
        for m in TOKEN_PATTERN.find_iter(&lowered) {
            let token = m.as_str().to_string();
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }
        tokens
    }

    /// 评论与查询词元的重合度。
    /// 采用子串包含而不是分词比对，韩文无空格分隔时同样有效。
    fn score(review_text: &str, tokens: &[String]) -> usize {
        let lowered = review_text.to_lowercase();
        tokens
            .iter()
            .filter(|token| lowered.contains(token.as_str()))
            .count()
    }

    /// 检索与查询最相关的top-k条评论，按得分降序排列，
    /// 同分时保持数据集原始顺序。没有任何重合的评论不会进入结果。
    pub fn top_matches(&self, query: &str, top_k: usize) -> Vec<ContextChunk> {
        let tokens = Self::tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &ReviewRecord)> = self
            .records
            .iter()
            .map(|record| (Self::score(&record.text, &tokens), record))
            .filter(|(score, _)| *score > 0)
            .collect();

        // sort_by稳定排序，同分保持数据集顺序
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored
            .into_iter()
            .take(top_k)
            .map(|(_, record)| ContextChunk::from(record))
            .collect()
    }
}

#[async_trait]
impl ContextSource for ReviewStore {
    fn name(&self) -> &'static str {
        "reviews"
    }

    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<ContextChunk>> {
        Ok(self.top_matches(query, top_k))
    }
}
