//! docmeta - document metadata analysis.
//!
//! Derives summary, classification, tags, topics and sentiment for uploaded
//! documents using two AI providers with quota cooldowns, a consensus merge,
//! and a deterministic rule-based fallback.

// Model types use `from_str` methods that return Option<Self>,
// not Result<Self, Error> as std::str::FromStr requires.
#![allow(clippy::should_implement_trait)]

pub mod analysis;
pub mod config;
pub mod llm;
pub mod models;
pub mod rate_limit;
pub mod server;
