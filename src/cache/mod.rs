//! 响应缓存模块：以内容寻址方式持久化请求/响应对。
//!
//! # Response Caching Module
//!
//! Content-addresses canonical requests and persists request/response pairs
//! under the derived key, letting repeated logical requests be served
//! deterministically without a provider round trip.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`CacheKey`] | SHA-256 content address of a canonical request |
//! | [`FileCacheStore`] | One-file-per-entry persistence with lookup, listing, and replay |
//! | [`CacheEntry`] | Persisted request/response pair with creation metadata |
//!
//! ## Cache Key Derivation
//!
//! Keys are the hex SHA-256 digest of the request's canonical serialization
//! ([`crate::request::CanonicalRequest::canonical_json`]). Identical logical
//! requests derive identical keys whatever the flag order, stop-list
//! whitespace, or streaming mode, so a second write of the same request is
//! an idempotent overwrite with identical content.

mod key;
mod store;

pub use key::CacheKey;
pub use store::{CacheEntry, CacheListing, CachedResponse, EntryMeta, FileCacheStore};
