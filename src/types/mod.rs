pub mod review;

pub use review::{ContextChunk, ReviewRecord, Sentiment};
