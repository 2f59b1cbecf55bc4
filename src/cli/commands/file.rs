//! File command implementation
//!
//! External references for all important symbols defined in one file.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::app::App;
use crate::cli::output::OutputFormat;

#[derive(Args, Debug)]
pub struct FileArgs {
    /// Source file to analyze
    pub path: PathBuf,
}

pub async fn execute(args: FileArgs, app: &App, format: OutputFormat) -> Result<()> {
    let path = app.resolve_path(&args.path);

    match app.engine.request_for_file(&path).await {
        Ok(tree) => app.output.print_tree(&tree, format),
        Err(e) => app.output.print_error(&e.to_string()),
    }

    Ok(())
}
