use crate::assistant::launch;
use anyhow::Result;
use clap::Parser;

mod assistant;
mod cache;
mod cli;
mod config;
mod i18n;
mod llm;
mod prompt;
mod retrieval;
mod search;
mod types;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    let question = args.question.clone();
    let config = args.into_config();

    launch(&config, question.as_deref()).await
}
