//! 问答流程 - 语言判定、上下文检索、提示词装配与模型推理

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::config::Config;
use crate::i18n::detect_language;
use crate::prompt::assemble_prompt;
use crate::search::format_reference_block;
use crate::types::ContextChunk;

pub mod context;

pub use context::AssistantContext;

/// 答案缓存分类目录
const ANSWER_CACHE_CATEGORY: &str = "answers";

/// 启动问答流程。给定问题时单次作答，否则进入交互式问答。
pub async fn launch(config: &Config, question: Option<&str>) -> Result<()> {
    let context = AssistantContext::new(config.clone())?;

    // 启动时检查模型连接。dry-run不触达模型，跳过检查。
    if !config.dry_run {
        context.llm_client.check_connection().await?;
    }

    match question {
        Some(q) => {
            let reply = answer(&context, q).await?;
            println!("{}", reply);
        }
        None => run_interactive(&context).await?,
    }

    Ok(())
}

/// 交互式问答循环。空行跳过，exit/quit或EOF退出。
async fn run_interactive(context: &AssistantContext) -> Result<()> {
    println!("💬 交互式问答已启动，输入 exit 退出");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question == "exit" || question == "quit" {
            break;
        }

        match answer(context, question).await {
            Ok(reply) => println!("{}\n", reply),
            Err(e) => eprintln!("❌ 回答失败: {}", e),
        }
    }

    Ok(())
}

/// 回答单个问题。
///
/// 流程：语言判定 → 评论检索（与网页检索并发） → 提示词装配 →
/// 缓存查询 → 模型推理 → 缓存写入。dry-run在装配后直接返回提示词。
pub async fn answer(context: &AssistantContext, question: &str) -> Result<String> {
    let config = &context.config;

    // 1. 查询语言：显式配置优先，否则按文本判定
    let language = config.language.unwrap_or_else(|| detect_language(question));
    if config.verbose {
        println!("🔤 查询语言: {}", language.display_name());
    }

    // 2. 评论检索；启用网页增强时与检索并发执行
    let (chunks, snippets) = match &context.searcher {
        Some(searcher) => {
            let (retrieved, searched) = futures::future::join(
                context.store.retrieve(question, config.top_k),
                searcher.search(question),
            )
            .await;

            // 网页检索失败只降级，不影响作答
            let snippets = searched.unwrap_or_else(|e| {
                eprintln!("⚠️ 网页检索失败，忽略增强: {}", e);
                Vec::new()
            });
            (retrieved?, snippets)
        }
        None => (
            context.store.retrieve(question, config.top_k).await?,
            Vec::new(),
        ),
    };

    if config.verbose {
        let (positive, negative) = context_summary(&chunks);
        println!(
            "🔍 命中评论 {} 条（好评{}/差评{}），网页摘录 {} 条",
            chunks.len(),
            positive,
            negative,
            snippets.len()
        );
    }

    // 3. 装配提示词。网页摘录渲染为参考资料段，追加在问题之后
    let question_block = if snippets.is_empty() {
        question.to_string()
    } else {
        format!(
            "{}\n\n{}",
            question,
            format_reference_block(&snippets, language)
        )
    };
    let assembled = assemble_prompt(&context.prompts, language, &chunks, &question_block)?;

    if config.dry_run {
        return Ok(assembled);
    }

    // 4. 缓存命中直接返回
    if let Some(cached) = context
        .cache_manager
        .get::<String>(ANSWER_CACHE_CATEGORY, &assembled)
        .await?
    {
        if config.verbose {
            println!("⚡ 命中答案缓存");
        }
        return Ok(cached);
    }

    // 5. 模型推理并写入缓存
    let generated = context.llm_client.generate(&assembled).await?;
    context
        .cache_manager
        .store(
            ANSWER_CACHE_CATEGORY,
            &assembled,
            generated.clone(),
            Some(config.llm.model.clone()),
        )
        .await?;

    Ok(generated)
}

/// 上下文块的好评/差评计数
fn context_summary(chunks: &[ContextChunk]) -> (usize, usize) {
    let positive = chunks
        .iter()
        .filter(|c| c.sentiment == crate::types::Sentiment::Positive)
        .count();
    (positive, chunks.len() - positive)
}
