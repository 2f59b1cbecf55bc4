//! refscope - External Reference Discovery Library
//!
//! Given a source file or folder, discovers every symbol defined inside it
//! that is referenced from outside it, and groups those cross-boundary
//! references by the external file containing them. Symbol and reference
//! computation is delegated to pluggable providers; refscope resolves,
//! caches, filters, aggregates, and presents.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod services;

pub use error::{RefscopeError, RefscopeResult};
