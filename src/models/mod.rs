//! Data models for refscope
//!
//! Contains core type definitions used throughout the application.

pub mod document;
pub mod symbol;
pub mod tree;

// Re-export commonly used types
pub use document::Document;
pub use symbol::{Location, Position, Range, Symbol, SymbolKind, SymbolReferences};
pub use tree::Node;
