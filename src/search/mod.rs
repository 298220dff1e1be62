//! Search module - substring search over stored records / 搜索模块
//!
//! Only exposes the search primitive; request validation and result shaping
//! live in the query service.
//!
//! Matching rules / 匹配规则：
//! - Case-insensitive (Unicode lowercase on both sides)
//! - A record matches if its name or email contains the query
//! - The empty query matches everything

pub mod engine;

pub use engine::{record_matches, SearchEngine};
