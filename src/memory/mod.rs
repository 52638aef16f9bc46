//! 会话记忆模块：有序、容量受限的会话轮次日志。
//!
//! # Conversation Memory Module
//!
//! An ordered, size-bounded log of conversation turns, each annotated by a
//! [`crate::summarize::Summarizer`]. The log is a file of append-only
//! records: every append is a single write of one complete record, so
//! concurrent invocations of the client sharing the same log cannot lose
//! each other's turns. Retention is enforced logically at read time and
//! physically by idempotent compaction once the file outgrows its bound.
//!
//! A missing or unparseable log reads as empty: memory degrades rather than
//! blocking the caller.

mod store;
mod types;

pub use store::MemoryStore;
pub use types::MemoryItem;
