pub mod assistant;
pub mod cache;
pub mod cli;
pub mod config;
pub mod i18n;
pub mod llm;
pub mod prompt;
pub mod retrieval;
pub mod search;
pub mod types;

// Re-export commonly used types
pub use assistant::launch;
pub use config::Config;
pub use i18n::{QueryLanguage, detect_language};
pub use prompt::{SystemPrompts, assemble_prompt};
