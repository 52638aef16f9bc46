//! # chatcache
//!
//! 这是命令行助手客户端的状态核心：内容寻址的响应缓存与容量受限的会话记忆存储。
//!
//! The stateful core of a command-line assistant client: a content-addressed
//! response cache and a bounded conversational-memory store that together
//! let repeated or related prompts be served deterministically and with
//! recent context.
//!
//! ## Overview
//!
//! The surrounding CLI (argument parsing, the HTTP transport to the model
//! provider, terminal output) is an external collaborator. This crate owns
//! the data model: canonical requests, their content addresses, the
//! persisted cache entries, and the summarized conversation log.
//!
//! ## Core Philosophy
//!
//! - **Deterministic identity**: semantically equal requests serialize to
//!   identical bytes and hash to identical keys, whatever the flag order or
//!   streaming mode
//! - **Availability over strictness**: a missing or corrupt store reads as
//!   empty and is noted, never fatal
//! - **Crash consistency**: entry writes rename into place atomically, and
//!   memory appends are single-write immutable records
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatcache::{
//!     canonicalize, CacheEntry, CachedResponse, Config, ContextComposer, FileCacheStore,
//!     KeywordSummarizer, MemoryStore, RawRequest,
//! };
//!
//! fn main() -> chatcache::Result<()> {
//!     let config = Config::from_env()?;
//!     let cache = FileCacheStore::open(&config);
//!     let memory = MemoryStore::open(&config, Box::new(KeywordSummarizer::new()));
//!
//!     let request = canonicalize(&RawRequest {
//!         model: "gpt-4o-mini",
//!         prompt: "What is a content-addressed cache?",
//!         temperature: "0.7",
//!         ..Default::default()
//!     })?;
//!
//!     let key = cache.key(&request)?;
//!     if let Some(entry) = cache.get(&key)? {
//!         println!("{}", cache.replay(&entry.key)?);
//!         return Ok(());
//!     }
//!
//!     let effective = ContextComposer::new(Some(&memory)).compose(
//!         None,
//!         "What is a content-addressed cache?",
//!         true,
//!     );
//!     let response = send_to_provider(&effective); // external collaborator
//!     cache.put(&CacheEntry::new(request, CachedResponse::text_only(response.as_str()))?)?;
//!     memory.append("What is a content-addressed cache?", Some(response.as_str()))?;
//!     Ok(())
//! }
//! # fn send_to_provider(_prompt: &str) -> String { String::new() }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Store locations, retention bounds, env overrides |
//! | [`request`] | Flag-level requests and canonicalization |
//! | [`cache`] | Content-addressed entry persistence, listing, replay |
//! | [`memory`] | Bounded conversation log with append-only persistence |
//! | [`summarize`] | Pluggable deterministic text summarization |
//! | [`compose`] | Effective-prompt composition from memory and prompt |

pub mod cache;
pub mod compose;
pub mod config;
pub mod memory;
pub mod request;
pub mod summarize;
pub mod types;

mod fsutil;

// Re-export main types for convenience
pub use cache::{CacheEntry, CacheKey, CacheListing, CachedResponse, EntryMeta, FileCacheStore};
pub use compose::ContextComposer;
pub use config::Config;
pub use memory::{MemoryItem, MemoryStore};
pub use request::{canonicalize, CanonicalRequest, RawRequest};
pub use summarize::{KeywordSummarizer, SentenceRecord, Summarizer};
pub use types::{CanonicalMessage, Role};

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the crate
pub mod error;
pub use error::{Error, ErrorContext};
