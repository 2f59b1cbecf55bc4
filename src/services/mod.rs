//! Service layer for refscope

pub mod cache;
pub mod engine;
pub mod filter;
pub mod present;
pub mod resolver;

pub use cache::{ReferenceCache, ReferenceKey, SymbolCache};
pub use engine::ReferenceEngine;
pub use resolver::{resolve_anchor, simple_symbol_name};
