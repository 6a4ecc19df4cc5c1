use std::sync::Arc;

use anyhow::Result;

use crate::{
    cache::CacheManager, config::Config, llm::client::LLMClient, prompt::SystemPrompts,
    retrieval::{ContextSource, ReviewStore}, search::WebSearchClient,
};

/// 问答流程的共享上下文
#[derive(Clone)]
pub struct AssistantContext {
    /// LLM调用器，用于与模型通信
    pub llm_client: LLMClient,
    /// 配置
    pub config: Config,
    /// 系统提示词映射表，启动后只读
    pub prompts: Arc<SystemPrompts>,
    /// 评论上下文提供方
    pub store: Arc<dyn ContextSource>,
    /// 缓存管理器
    pub cache_manager: Arc<CacheManager>,
    /// 网页检索客户端，未启用时为None
    pub searcher: Option<Arc<WebSearchClient>>,
}

impl AssistantContext {
    /// 创建新的问答上下文，从配置的数据集路径加载评论库
    pub fn new(config: Config) -> Result<Self> {
        let store = ReviewStore::load(&config.dataset_path)?;
        if config.verbose {
            println!("📚 已加载评论数据 {} 条", store.len());
        }
        Self::with_source(config, Arc::new(store))
    }

    /// 以给定的上下文提供方创建问答上下文
    pub fn with_source(config: Config, store: Arc<dyn ContextSource>) -> Result<Self> {
        let llm_client = LLMClient::new(config.llm.clone())?;
        let prompts = Arc::new(SystemPrompts::from_config(&config.prompts));
        let cache_manager = Arc::new(CacheManager::new(config.cache.clone()));
        let searcher = if config.search.enabled {
            Some(Arc::new(WebSearchClient::new(config.search.clone())?))
        } else {
            None
        };

        Ok(Self {
            llm_client,
            config,
            prompts,
            store,
            cache_manager,
            searcher,
        })
    }
}
