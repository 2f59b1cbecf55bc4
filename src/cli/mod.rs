//! CLI module for refscope
//!
//! Provides the command-line interface using clap derive macros.

pub mod commands;
pub mod output;

pub use output::{OutputContext, OutputFormat};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{file::FileArgs, folder::FolderArgs};

const LONG_ABOUT: &str = r#"
refscope - external reference discovery for files and folders

Given a unit of code about to be moved, deleted, or refactored, refscope
shows its external blast radius: every symbol defined inside the unit that
is referenced from outside it, grouped by the referencing file.

Symbol and reference lookups come from a pre-computed JSON index
(see --index), so refscope works with any indexer or editor export.

QUICK START:
  1. Point at an index:       refscope --index refs.json file src/api.rs
  2. Whole-folder analysis:   refscope --index refs.json folder src/api
  3. Plain-text outline:      refscope --format text file src/api.rs
"#;

/// refscope - external reference discovery for files and folders
#[derive(Parser, Debug)]
#[command(name = "refscope")]
#[command(author, version, about, long_about = LONG_ABOUT)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Symbol index file (JSON); defaults to 'index' from .refscope.toml
    #[arg(long, global = true)]
    pub index: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// External references into a single file
    File(FileArgs),

    /// External references into a folder subtree
    Folder(FolderArgs),
}
