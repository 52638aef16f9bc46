//! File-backed conversation memory.

use super::types::{schema_version, MemoryItem};
use crate::config::Config;
use crate::fsutil;
use crate::summarize::{SentenceRecord, Summarizer};
use crate::Result;
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

/// Entries kept in each item's `pairs` and `summary` digests.
const MAX_DIGEST: usize = 8;
/// Physical trimming kicks in once the file holds this many times the
/// retention bound.
const COMPACT_FACTOR: usize = 4;

/// Ordered, size-bounded log of conversation turns.
///
/// The persisted form is one JSON record per line, append-only. Only the
/// newest `max_keep` records are ever surfaced, whatever the file holds;
/// [`MemoryStore::compact`] trims the file itself.
pub struct MemoryStore {
    path: PathBuf,
    max_keep: usize,
    summarizer: Box<dyn Summarizer>,
}

impl MemoryStore {
    pub fn open(config: &Config, summarizer: Box<dyn Summarizer>) -> Self {
        Self {
            path: config.memory_file.clone(),
            max_keep: config.max_keep,
            summarizer,
        }
    }

    /// Record one turn: summarize the prompt, persist the item, trim if the
    /// file has outgrown its bound.
    ///
    /// The record goes out in a single append-mode write, so a concurrent
    /// invocation appending to the same log cannot clobber it.
    pub fn append(&self, prompt: &str, response: Option<&str>) -> Result<MemoryItem> {
        let item = self.build_item(prompt, response);
        let mut line = serde_json::to_string(&item)?;
        line.push('\n');

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        self.compact_if_oversized();
        Ok(item)
    }

    /// The last `min(max_items, len)` turns in original order. Non-mutating.
    pub fn window(&self, max_items: usize) -> Vec<MemoryItem> {
        let mut items = self.read_log();
        let start = items.len().saturating_sub(max_items);
        items.split_off(start)
    }

    /// Render the window as an alternating `User:` / `Assistant:` transcript,
    /// with `with_prompt` as a trailing user line when given. Empty window
    /// and empty prompt render as the empty string.
    pub fn join(&self, max_items: usize, with_prompt: Option<&str>) -> String {
        let mut lines = Vec::new();
        for item in self.window(max_items) {
            lines.push(format!("User: {}", item.prompt));
            if let Some(response) = item.response {
                lines.push(format!("Assistant: {}", response));
            }
        }
        if let Some(prompt) = with_prompt.filter(|p| !p.is_empty()) {
            lines.push(format!("User: {}", prompt));
        }
        lines.join("\n")
    }

    /// Delete the persisted log. Subsequent reads see an empty log; the file
    /// is lazily recreated by the next append.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Turns currently retained (at most `max_keep`).
    pub fn len(&self) -> usize {
        self.read_log().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rewrite the log keeping only the newest `max_keep` records.
    ///
    /// Idempotent, and safe to run from any invocation: the trimmed file
    /// replaces the old one atomically. A record appended by another process
    /// between the read and the rename is lost; at most that one, and only
    /// while the log is already over its physical bound.
    pub fn compact(&self) -> Result<()> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        let lines: Vec<&str> = raw.lines().filter(|l| !l.trim().is_empty()).collect();
        if lines.len() <= self.max_keep {
            return Ok(());
        }
        let start = lines.len() - self.max_keep;
        let mut kept = lines[start..].join("\n");
        kept.push('\n');
        fsutil::write_atomic(&self.path, kept.as_bytes())?;
        Ok(())
    }

    fn build_item(&self, prompt: &str, response: Option<&str>) -> MemoryItem {
        let analysis = self.summarizer.analyze(prompt);
        let (pairs, summary) = digest(&analysis);
        MemoryItem {
            schema: schema_version(),
            ts: Utc::now(),
            prompt: prompt.to_string(),
            response: response.map(str::to_string),
            analysis,
            pairs,
            summary,
        }
    }

    /// Parse the log, skipping blank and unparseable lines, and keep only
    /// the newest `max_keep` records: retention is a read-side invariant.
    fn read_log(&self) -> Vec<MemoryItem> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "memory log unreadable, reading as empty"
                );
                return Vec::new();
            }
        };
        let mut items = Vec::new();
        for (idx, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<MemoryItem>(line) {
                Ok(item) => items.push(item),
                Err(e) => {
                    tracing::warn!(line = idx + 1, error = %e, "skipping unparseable memory record");
                }
            }
        }
        let start = items.len().saturating_sub(self.max_keep);
        items.split_off(start)
    }

    fn compact_if_oversized(&self) {
        let oversized = fs::read_to_string(&self.path)
            .map(|raw| raw.lines().filter(|l| !l.trim().is_empty()).count())
            .map(|n| n > COMPACT_FACTOR * self.max_keep)
            .unwrap_or(false);
        if oversized {
            if let Err(e) = self.compact() {
                tracing::warn!(path = %self.path.display(), error = %e, "memory log compaction failed");
            }
        }
    }
}

/// Union of sentence pairs and keywords in first-appearance order,
/// deduplicated and capped. Degenerate (empty) pairs are not recorded.
fn digest(analysis: &[SentenceRecord]) -> (Vec<Vec<String>>, Vec<String>) {
    let mut pairs: Vec<Vec<String>> = Vec::new();
    let mut summary: Vec<String> = Vec::new();
    for record in analysis {
        if !record.pair.is_empty() && pairs.len() < MAX_DIGEST && !pairs.contains(&record.pair) {
            pairs.push(record.pair.clone());
        }
        for keyword in &record.keywords {
            if summary.len() < MAX_DIGEST && !summary.contains(keyword) {
                summary.push(keyword.clone());
            }
        }
    }
    (pairs, summary)
}
