//! Store configuration and state-directory resolution.
//!
//! Configuration is an explicit value threaded into each store constructor;
//! nothing in the crate reads ambient state after construction. Path
//! resolution honors environment overrides first and falls back to a
//! platform-appropriate data directory.

use crate::error::{Error, ErrorContext};
use crate::Result;
use std::path::PathBuf;

const APP_DIR: &str = "chatcache";
const CACHE_SUBDIR: &str = "cache";
const MEMORY_FILE: &str = "memory.jsonl";

/// Overrides the state root holding both the default cache dir and the memory log.
const STATE_DIR_ENV: &str = "CHATCACHE_STATE_DIR";
/// Overrides the cache entry directory alone.
const CACHE_DIR_ENV: &str = "CHATCACHE_CACHE_DIR";

/// Default retention bound for the memory log.
pub const DEFAULT_MAX_KEEP: usize = 25;

/// Locations and retention bounds for the two stores.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding one JSON file per cache entry.
    pub cache_dir: PathBuf,
    /// Append-only conversation log.
    pub memory_file: PathBuf,
    /// Most recent turns retained by the memory store.
    pub max_keep: usize,
}

impl Config {
    pub fn new(cache_dir: impl Into<PathBuf>, memory_file: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            memory_file: memory_file.into(),
            max_keep: DEFAULT_MAX_KEEP,
        }
    }

    pub fn with_max_keep(mut self, max_keep: usize) -> Self {
        self.max_keep = max_keep;
        self
    }

    /// Resolve store locations from the environment.
    ///
    /// Priority: `CHATCACHE_CACHE_DIR` / `CHATCACHE_STATE_DIR` env vars, then
    /// the platform data directory (e.g. `~/.local/share/chatcache` on Linux).
    pub fn from_env() -> Result<Self> {
        let state_root = resolve_state_dir()?;
        let cache_dir = match env_path(CACHE_DIR_ENV) {
            Some(dir) => dir,
            None => state_root.join(CACHE_SUBDIR),
        };
        Ok(Self::new(cache_dir, state_root.join(MEMORY_FILE)))
    }
}

fn resolve_state_dir() -> Result<PathBuf> {
    if let Some(dir) = env_path(STATE_DIR_ENV) {
        return Ok(dir);
    }
    dirs::data_dir().map(|d| d.join(APP_DIR)).ok_or_else(|| {
        Error::configuration_with_context(
            "could not determine a platform data directory",
            ErrorContext::new()
                .with_details(format!("set {} to choose a state root", STATE_DIR_ENV))
                .with_source("config"),
        )
    })
}

fn env_path(var: &str) -> Option<PathBuf> {
    match std::env::var(var) {
        Ok(dir) if !dir.trim().is_empty() => Some(PathBuf::from(dir)),
        _ => None,
    }
}
