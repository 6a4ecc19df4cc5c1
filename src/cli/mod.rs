use crate::config::{Config, LLMProvider};
use crate::i18n::QueryLanguage;
use clap::Parser;
use std::path::PathBuf;

/// ReviewQA-RS - 基于本地大模型的双语评论问答助手
#[derive(Parser, Debug)]
#[command(name = "reviewqa-rs")]
#[command(
    about = "A locally-hosted bilingual (English/Korean) assistant that answers questions over a product review dataset, with optional web search augmentation."
)]
#[command(author = "Sopaco")]
#[command(version)]
pub struct Args {
    /// 要提问的问题。缺省时进入交互式问答
    pub question: Option<String>,

    /// 评论数据集路径
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 进入提示词的检索上下文条数上限
    #[arg(short, long)]
    pub top_k: Option<usize>,

    /// 强制指定查询语言 (en, ko)，缺省时自动判定
    #[arg(short, long)]
    pub language: Option<String>,

    /// LLM Provider (ollama, openai)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// 推理模型
    #[arg(short, long)]
    pub model: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 启用网页检索增强
    #[arg(long)]
    pub web_search: bool,

    /// 是否禁用缓存
    #[arg(long)]
    pub no_cache: bool,

    /// 只装配提示词而不调用模型
    #[arg(long)]
    pub dry_run: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Config {
        let mut config = if let Some(config_path) = &self.config {
            // 如果显式指定了配置文件路径，从该路径加载
            Config::from_file(config_path).unwrap_or_else(|_| {
                panic!("⚠️ 警告: 无法读取配置文件 {:?}", config_path)
            })
        } else {
            // 如果没有显式指定配置文件，尝试从默认位置加载
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| std::path::PathBuf::from("."))
                .join("reviewqa.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path).unwrap_or_else(|_| {
                    panic!(
                        "⚠️ 警告: 无法读取默认配置文件 {:?}",
                        default_config_path
                    )
                })
            } else {
                // 默认配置文件不存在，使用默认值
                Config::default()
            }
        };

        // 覆盖配置文件中的设置
        if let Some(dataset) = self.dataset {
            config.dataset_path = dataset;
        }
        if let Some(top_k) = self.top_k {
            config.top_k = top_k;
        }

        // 查询语言配置：CLI显式指定时跳过自动判定
        if let Some(language_str) = self.language {
            if let Ok(language) = language_str.parse::<QueryLanguage>() {
                config.language = Some(language);
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的查询语言: {}，将按查询文本自动判定",
                    language_str
                );
            }
        }

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider",
                    provider_str
                );
            }
        }
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }

        // 网页检索增强配置
        if self.web_search {
            config.search.enabled = true;
        }

        // 缓存配置
        if self.no_cache {
            config.cache.enabled = false;
        }

        // 其他配置
        if self.dry_run {
            config.dry_run = true;
        }
        if self.verbose {
            config.verbose = true;
        }

        config
    }
}
