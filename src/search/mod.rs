//! 网页检索增强 - 通过DuckDuckGo instant answer接口补充公开资料

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

use crate::config::SearchConfig;
use crate::i18n::QueryLanguage;

/// 单条网页检索结果摘录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSnippet {
    pub text: String,
}

/// 网页检索客户端
pub struct WebSearchClient {
    client: Client,
    config: SearchConfig,
}

impl WebSearchClient {
    pub fn new(config: SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to build web search client")?;
        Ok(Self { client, config })
    }

    /// 检索查询相关的公开资料摘录。
    /// instant answer接口无需API KEY，返回摘要与相关主题两类文本。
    pub async fn search(&self, query: &str) -> Result<Vec<SearchSnippet>> {
        let resp: serde_json::Value = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .context("Web search request failed")?
            .json()
            .await
            .context("Failed to parse web search response")?;

        let mut snippets = Vec::new();

        if let Some(abstract_text) = resp["AbstractText"].as_str()
            && !abstract_text.is_empty()
        {
            snippets.push(SearchSnippet {
                text: abstract_text.to_string(),
            });
        }

        if let Some(related) = resp["RelatedTopics"].as_array() {
            for item in related {
                if snippets.len() >= self.config.max_results {
                    break;
                }
                if let Some(text) = item["Text"].as_str()
                    && !text.is_empty()
                {
                    snippets.push(SearchSnippet {
                        text: text.to_string(),
                    });
                }
            }
        }

        snippets.truncate(self.config.max_results);
        Ok(snippets)
    }
}

/// 把检索摘录渲染为追加在问题之后的参考资料段。
/// 段首标题跟随查询语言，摘录为空时返回空串。
pub fn format_reference_block(snippets: &[SearchSnippet], language: QueryLanguage) -> String {
    if snippets.is_empty() {
        return String::new();
    }

    let header = match language {
        QueryLanguage::English => "Web search references:",
        QueryLanguage::Korean => "웹 검색 참고 자료:",
    };

    let mut block = String::from(header);
    for snippet in snippets {
        block.push_str(&format!("\n- {}", snippet.text));
    }
    block
}
