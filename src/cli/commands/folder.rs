//! Folder command implementation
//!
//! External references for everything defined under a folder, excluding
//! reference sites inside the folder itself.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::app::App;
use crate::cli::output::OutputFormat;

#[derive(Args, Debug)]
pub struct FolderArgs {
    /// Folder to analyze recursively
    pub path: PathBuf,
}

pub async fn execute(args: FolderArgs, app: &App, format: OutputFormat) -> Result<()> {
    let path = app.resolve_path(&args.path);

    match app.engine.request_for_folder(&path).await {
        Ok(tree) => app.output.print_tree(&tree, format),
        Err(e) => app.output.print_error(&e.to_string()),
    }

    Ok(())
}
