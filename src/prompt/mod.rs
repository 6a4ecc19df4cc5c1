//! 提示词路由 - 按查询语言选择系统提示词，并把检索上下文装配成最终提示词

use std::collections::HashMap;

use thiserror::Error;

use crate::config::PromptConfig;
use crate::i18n::QueryLanguage;
use crate::types::ContextChunk;

/// 英文系统提示词（内置默认值）
const SYSTEM_PROMPT_EN: &str = r#"You are a helpful assistant that answers questions about product reviews.
Use the reviews provided below to answer the user's question. Each review is
tagged with its sentiment polarity. Base your answer on the reviews; if they do
not contain enough information, say so honestly instead of guessing.
Answer in English."#;

/// 韩文系统提示词（内置默认值）
const SYSTEM_PROMPT_KO: &str = r#"당신은 제품 리뷰에 대한 질문에 답변하는 어시스턴트입니다.
아래 제공된 리뷰를 참고하여 사용자의 질문에 답변하세요. 각 리뷰에는 감성
극성 태그가 붙어 있습니다. 답변은 리뷰 내용에 근거해야 하며, 리뷰에 충분한
정보가 없으면 추측하지 말고 솔직하게 말하세요.
한국어로 답변하세요."#;

/// 提示词装配错误
#[derive(Error, Debug)]
pub enum PromptError {
    /// 语言标签没有对应的系统提示词。两种内置语言下不应出现，
    /// 但新增语言标签时必须显式暴露，不允许静默回退。
    #[error("no system prompt template configured for language `{0}`")]
    MissingTemplate(QueryLanguage),
}

/// 系统提示词映射表。启动时构建一次，之后只读。
#[derive(Debug, Clone)]
pub struct SystemPrompts {
    templates: HashMap<QueryLanguage, String>,
}

impl Default for SystemPrompts {
    fn default() -> Self {
        let mut templates = HashMap::new();
        templates.insert(QueryLanguage::English, SYSTEM_PROMPT_EN.to_string());
        templates.insert(QueryLanguage::Korean, SYSTEM_PROMPT_KO.to_string());
        Self { templates }
    }
}

impl SystemPrompts {
    /// 以给定的模板映射构建。新增语言标签时调用方必须同时提供其模板，
    /// 否则装配阶段会得到`MissingTemplate`错误。
    pub fn new(templates: HashMap<QueryLanguage, String>) -> Self {
        Self { templates }
    }

    /// 在内置模板基础上套用配置文件中的自定义模板
    pub fn from_config(config: &PromptConfig) -> Self {
        let mut prompts = Self::default();
        if let Some(ref en) = config.en
            && !en.trim().is_empty()
        {
            prompts
                .templates
                .insert(QueryLanguage::English, en.clone());
        }
        if let Some(ref ko) = config.ko
            && !ko.trim().is_empty()
        {
            prompts.templates.insert(QueryLanguage::Korean, ko.clone());
        }
        prompts
    }

    /// 查找指定语言的系统提示词
    pub fn template(&self, language: QueryLanguage) -> Result<&str, PromptError> {
        self.templates
            .get(&language)
            .map(String::as_str)
            .ok_or(PromptError::MissingTemplate(language))
    }
}

/// 把上下文块渲染为带情感标签的文本块。
/// 每条形如`[POSITIVE] <text>`，保持输入顺序，块间以单个换行分隔。
pub fn format_context_block(chunks: &[ContextChunk]) -> String {
    chunks
        .iter()
        .map(|chunk| format!("[{}] {}", chunk.sentiment, chunk.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 装配最终提示词：系统提示词、上下文块、原始查询，三段之间以空行分隔。
///
/// 纯装配，不发起任何后端调用。空的上下文序列产生空的上下文块而不是错误。
pub fn assemble_prompt(
    prompts: &SystemPrompts,
    language: QueryLanguage,
    chunks: &[ContextChunk],
    query: &str,
) -> Result<String, PromptError> {
    let template = prompts.template(language)?;
    let context_block = format_context_block(chunks);
    Ok(format!("{}\n\n{}\n\n{}", template, context_block, query))
}

// Include tests
#[cfg(test)]
mod tests;
