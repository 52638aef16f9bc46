//! 类型系统模块：定义请求规范化所用的核心数据类型。
//!
//! # Types Module
//!
//! Core data types shared across the crate: the message shape that canonical
//! requests are built from.

pub mod message;

pub use message::{CanonicalMessage, Role};
