//! File-backed cache store.

use super::key::CacheKey;
use crate::config::Config;
use crate::error::Error;
use crate::fsutil;
use crate::request::CanonicalRequest;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Listing previews truncate the prompt to this many characters.
const PREVIEW_CHARS: usize = 80;

fn schema_version() -> u32 {
    1
}

/// Response payload stored with an entry.
///
/// `text` is what replay prefers; `raw` preserves the provider payload for
/// entries written from a raw response. Both tolerate absence on read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CachedResponse {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

impl CachedResponse {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            raw: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryMeta {
    #[serde(default = "schema_version")]
    pub schema: u32,
    pub created_at: DateTime<Utc>,
    pub model: String,
}

/// One persisted request/response pair.
///
/// Immutable after creation; the only overwrite path is a `put` under the
/// same key, which by construction carries identical content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub request: CanonicalRequest,
    pub response: CachedResponse,
    pub meta: EntryMeta,
}

impl CacheEntry {
    /// Build an entry for a request/response pair, deriving its key.
    pub fn new(request: CanonicalRequest, response: CachedResponse) -> Result<Self> {
        let key = CacheKey::of(&request)?;
        let model = request.model.clone();
        Ok(Self {
            key,
            request,
            response,
            meta: EntryMeta {
                schema: schema_version(),
                created_at: Utc::now(),
                model,
            },
        })
    }
}

/// One row of `list` output.
#[derive(Debug, Clone)]
pub struct CacheListing {
    pub key: CacheKey,
    pub created_at: DateTime<Utc>,
    pub model: String,
    pub prompt_preview: String,
}

/// One JSON file per entry, named by key, in a dedicated directory.
///
/// Writes go through a temp file and an atomic rename: an interrupted
/// invocation never leaves a partially written entry observable, and racing
/// writers of the same key overwrite with identical content.
pub struct FileCacheStore {
    dir: PathBuf,
}

impl FileCacheStore {
    pub fn open(config: &Config) -> Self {
        Self {
            dir: config.cache_dir.clone(),
        }
    }

    /// Derive the content address for a canonical request.
    pub fn key(&self, request: &CanonicalRequest) -> Result<CacheKey> {
        CacheKey::of(request)
    }

    /// Write or overwrite the entry file for the entry's key.
    pub fn put(&self, entry: &CacheEntry) -> Result<()> {
        let data = serde_json::to_vec_pretty(entry)?;
        fsutil::write_atomic(&self.entry_path(&entry.key), &data)?;
        Ok(())
    }

    /// Look up an entry. Missing and corrupt files both read as absent;
    /// corruption is noted but never propagated.
    pub fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>> {
        let path = self.entry_path(key);
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice::<CacheEntry>(&raw) {
            Ok(entry) if entry.key == *key => Ok(Some(entry)),
            Ok(entry) => {
                tracing::warn!(
                    path = %path.display(),
                    recorded = %entry.key,
                    "cache entry key does not match its file name, treating as absent"
                );
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "corrupt cache entry, treating as absent");
                Ok(None)
            }
        }
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entry_path(key).is_file()
    }

    /// Enumerate all parseable entries for display, oldest first.
    pub fn list(&self) -> Result<Vec<CacheListing>> {
        let dir = match fs::read_dir(&self.dir) {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut rows = Vec::new();
        for dent in dir {
            let path = dent?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let entry = match fs::read(&path).ok().and_then(|raw| {
                serde_json::from_slice::<CacheEntry>(&raw)
                    .map_err(|e| {
                        tracing::warn!(path = %path.display(), error = %e, "skipping unparseable cache entry");
                    })
                    .ok()
            }) {
                Some(entry) => entry,
                None => continue,
            };
            rows.push(CacheListing {
                prompt_preview: preview(&entry.request),
                key: entry.key,
                created_at: entry.meta.created_at,
                model: entry.meta.model,
            });
        }
        rows.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.key.as_str().cmp(b.key.as_str()))
        });
        Ok(rows)
    }

    /// The stored response text, falling back to the raw provider payload.
    /// An absent key is a distinct not-found condition, never an empty
    /// response.
    pub fn replay(&self, key: &CacheKey) -> Result<String> {
        let entry = self.get(key)?.ok_or_else(|| Error::NotFound {
            key: key.to_string(),
        })?;
        if let Some(text) = entry.response.text {
            return Ok(text);
        }
        match entry.response.raw {
            Some(raw) => Ok(serde_json::to_string_pretty(&raw)?),
            None => Ok(String::new()),
        }
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

/// First user message, truncated with an ellipsis marker.
fn preview(request: &CanonicalRequest) -> String {
    let prompt = request.user_prompt().unwrap_or_default();
    let mut out: String = prompt.chars().take(PREVIEW_CHARS).collect();
    if prompt.chars().count() > PREVIEW_CHARS {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{canonicalize, RawRequest};

    #[test]
    fn test_preview_truncates_long_prompts() {
        let long = "x".repeat(100);
        let request = canonicalize(&RawRequest {
            model: "m",
            prompt: &long,
            temperature: "0",
            ..Default::default()
        })
        .unwrap();
        let shown = preview(&request);
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 1);
        assert!(shown.ends_with('…'));

        let request = canonicalize(&RawRequest {
            model: "m",
            prompt: "short",
            temperature: "0",
            ..Default::default()
        })
        .unwrap();
        assert_eq!(preview(&request), "short");
    }
}
