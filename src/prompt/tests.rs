#[cfg(test)]
mod tests {
    use crate::config::PromptConfig;
    use crate::i18n::QueryLanguage;
    use crate::prompt::{SystemPrompts, assemble_prompt, format_context_block};
    use crate::types::{ContextChunk, Sentiment};

    fn battery_chunks() -> Vec<ContextChunk> {
        vec![
            ContextChunk::new(Sentiment::Positive, "Great battery"),
            ContextChunk::new(Sentiment::Negative, "Screen creases"),
        ]
    }

    #[test]
    fn test_format_context_block_tags_and_order() {
        let block = format_context_block(&battery_chunks());
        assert_eq!(block, "[POSITIVE] Great battery\n[NEGATIVE] Screen creases");
    }

    #[test]
    fn test_format_context_block_empty() {
        assert_eq!(format_context_block(&[]), "");
    }

    #[test]
    fn test_assemble_prompt_english_layout() {
        let prompts = SystemPrompts::default();
        let query = "How is the battery?";
        let assembled =
            assemble_prompt(&prompts, QueryLanguage::English, &battery_chunks(), query).unwrap();

        let template = prompts.template(QueryLanguage::English).unwrap();
        let expected = format!(
            "{}\n\n[POSITIVE] Great battery\n[NEGATIVE] Screen creases\n\n{}",
            template, query
        );
        assert_eq!(assembled, expected);

        // 上下文块顺序保持检索顺序
        let positive_at = assembled.find("[POSITIVE] Great battery").unwrap();
        let negative_at = assembled.find("[NEGATIVE] Screen creases").unwrap();
        assert!(positive_at < negative_at);
        assert!(assembled.ends_with(query));
    }

    #[test]
    fn test_assemble_prompt_korean_uses_korean_template() {
        let prompts = SystemPrompts::default();
        let assembled = assemble_prompt(
            &prompts,
            QueryLanguage::Korean,
            &[],
            "배터리는 어떤가요?",
        )
        .unwrap();

        let korean_template = prompts.template(QueryLanguage::Korean).unwrap();
        let english_template = prompts.template(QueryLanguage::English).unwrap();
        assert!(assembled.starts_with(korean_template));
        assert!(!assembled.contains(english_template));
    }

    #[test]
    fn test_assemble_prompt_empty_chunks_yields_empty_block() {
        let prompts = SystemPrompts::default();
        let assembled =
            assemble_prompt(&prompts, QueryLanguage::English, &[], "Any thoughts?").unwrap();

        let template = prompts.template(QueryLanguage::English).unwrap();
        assert_eq!(assembled, format!("{}\n\n\n\nAny thoughts?", template));
    }

    #[test]
    fn test_assemble_prompt_is_deterministic() {
        let prompts = SystemPrompts::default();
        let chunks = battery_chunks();
        let a = assemble_prompt(&prompts, QueryLanguage::English, &chunks, "q").unwrap();
        let b = assemble_prompt(&prompts, QueryLanguage::English, &chunks, "q").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_template_is_an_error() {
        use std::collections::HashMap;

        let mut templates = HashMap::new();
        templates.insert(QueryLanguage::English, "English only.".to_string());
        let prompts = SystemPrompts::new(templates);

        let result = assemble_prompt(&prompts, QueryLanguage::Korean, &[], "질문");
        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("no system prompt template"));
        assert!(message.contains("ko"));
    }

    #[test]
    fn test_prompts_from_config_overrides() {
        let config = PromptConfig {
            en: Some("Custom English template.".to_string()),
            ko: None,
        };
        let prompts = SystemPrompts::from_config(&config);

        assert_eq!(
            prompts.template(QueryLanguage::English).unwrap(),
            "Custom English template."
        );
        // 未覆盖的语言保留内置模板
        assert!(
            prompts
                .template(QueryLanguage::Korean)
                .unwrap()
                .contains("한국어")
        );
    }

    #[test]
    fn test_prompts_from_config_blank_override_ignored() {
        let config = PromptConfig {
            en: Some("   ".to_string()),
            ko: None,
        };
        let prompts = SystemPrompts::from_config(&config);
        assert!(
            prompts
                .template(QueryLanguage::English)
                .unwrap()
                .contains("product reviews")
        );
    }
}
