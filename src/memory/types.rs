//! Memory log data types.

use crate::summarize::SentenceRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub(crate) fn schema_version() -> u32 {
    1
}

/// One conversation turn with its summarization artifacts.
///
/// Built once per append and never mutated afterwards; a turn leaves the log
/// only through retention or an explicit clear. Persisted as one JSON record
/// per line; unknown fields are ignored on read so newer writers stay
/// readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryItem {
    #[serde(default = "schema_version")]
    pub schema: u32,
    pub ts: DateTime<Utc>,
    pub prompt: String,
    #[serde(default)]
    pub response: Option<String>,
    /// Per-sentence summarizer output for the prompt.
    #[serde(default)]
    pub analysis: Vec<SentenceRecord>,
    /// Distinct leading keyword pairs, first-appearance order, capped.
    #[serde(default)]
    pub pairs: Vec<Vec<String>>,
    /// Distinct keywords across all sentences, first-appearance order, capped.
    #[serde(default)]
    pub summary: Vec<String>,
}
