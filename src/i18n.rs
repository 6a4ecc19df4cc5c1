use serde::{Deserialize, Serialize};

/// Hangul音节区块范围（U+AC00..=U+D7A3，预组合韩文音节）
pub const HANGUL_SYLLABLE_START: char = '\u{AC00}';
pub const HANGUL_SYLLABLE_END: char = '\u{D7A3}';

/// 韩文占比判定阈值：Hangul字符超过全部字母字符的该比例时判定为韩语。
/// 分母统计任意文字系统的字母字符，与数据源保持一致。
pub const KOREAN_RATIO_THRESHOLD: f64 = 0.3;

/// 查询语言类型
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueryLanguage {
    #[serde(rename = "en")]
    #[default]
    English,
    #[serde(rename = "ko")]
    Korean,
}

impl std::fmt::Display for QueryLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryLanguage::English => write!(f, "en"),
            QueryLanguage::Korean => write!(f, "ko"),
        }
    }
}

impl std::str::FromStr for QueryLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" | "영어" => Ok(QueryLanguage::English),
            "ko" | "korean" | "한국어" => Ok(QueryLanguage::Korean),
            _ => Err(format!("Unknown query language: {}", s)),
        }
    }
}

impl QueryLanguage {
    /// 获取语言的描述性名称
    pub fn display_name(&self) -> &'static str {
        match self {
            QueryLanguage::English => "English",
            QueryLanguage::Korean => "한국어",
        }
    }
}

/// 根据Hangul字符占比判定查询语言。
///
/// 统计落在Hangul音节区块内的字符数与全部字母字符数，
/// 占比超过阈值判定为韩语，否则为英语。
/// 纯数字或纯符号输入没有字母字符可供判断，直接判定为英语。
pub fn detect_language(text: &str) -> QueryLanguage {
    let mut korean_chars: usize = 0;
    let mut total_chars: usize = 0;

    for c in text.chars() {
        if c.is_alphabetic() {
            total_chars += 1;
            if (HANGUL_SYLLABLE_START..=HANGUL_SYLLABLE_END).contains(&c) {
                korean_chars += 1;
            }
        }
    }

    // 零分母保护：没有字母字符时不做比例判断
    if total_chars == 0 {
        return QueryLanguage::English;
    }

    if korean_chars as f64 > KOREAN_RATIO_THRESHOLD * total_chars as f64 {
        QueryLanguage::Korean
    } else {
        QueryLanguage::English
    }
}
