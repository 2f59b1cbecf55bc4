//! Command implementations

pub mod file;
pub mod folder;
