//! 文本摘要模块：将自由文本压缩为确定性的关键词记录。
//!
//! # Summarization Module
//!
//! Compresses free text into per-sentence keyword records for the memory
//! store. The trait keeps summarization pluggable: retention and windowing
//! in [`crate::memory`] never depend on how a turn was compressed, so a
//! stronger summarizer can replace [`KeywordSummarizer`] without touching
//! the store.

mod keyword;

pub use keyword::KeywordSummarizer;

use serde::{Deserialize, Serialize};

/// One analyzed sentence: the surviving keywords and the leading pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceRecord {
    /// The trimmed sentence text.
    pub text: String,
    /// Up to six lowercase alphanumeric tokens, in sentence order.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// The first two keywords; shorter when the sentence has fewer.
    #[serde(default)]
    pub pair: Vec<String>,
}

/// Turns free text into a small set of deterministic sentence records.
pub trait Summarizer: Send + Sync {
    fn analyze(&self, text: &str) -> Vec<SentenceRecord>;
}
