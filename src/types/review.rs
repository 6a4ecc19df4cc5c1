use serde::{Deserialize, Serialize};

/// 评论的情感极性标签
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    #[serde(rename = "positive")]
    Positive,
    #[serde(rename = "negative")]
    Negative,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "POSITIVE"),
            Sentiment::Negative => write!(f, "NEGATIVE"),
        }
    }
}

impl std::str::FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "positive" | "pos" => Ok(Sentiment::Positive),
            "negative" | "neg" => Ok(Sentiment::Negative),
            _ => Err(format!("Unknown sentiment tag: {}", s)),
        }
    }
}

/// 评论数据集中的单条记录
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReviewRecord {
    /// 情感极性标签
    pub sentiment: Sentiment,

    /// 评论正文
    pub text: String,

    /// 评论对应的商品名称（数据集中可缺省）
    #[serde(default)]
    pub product: Option<String>,
}

/// 进入提示词的检索上下文块。检索结果按相关性排序，顺序会原样保留到提示词中。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ContextChunk {
    pub sentiment: Sentiment,
    pub text: String,
}

impl ContextChunk {
    pub fn new(sentiment: Sentiment, text: impl Into<String>) -> Self {
        Self {
            sentiment,
            text: text.into(),
        }
    }
}

impl From<&ReviewRecord> for ContextChunk {
    fn from(record: &ReviewRecord) -> Self {
        Self {
            sentiment: record.sentiment,
            text: record.text.clone(),
        }
    }
}
