//! refscope - External Reference Discovery CLI
//!
//! Shows the external blast radius of a file or folder: every symbol it
//! defines that is referenced from outside, grouped by referencing file.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use refscope::app::App;
use refscope::cli::{Cli, Commands};

fn main() {
    // Quiet defaults; use RUST_LOG=refscope=debug for verbose output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "refscope=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!(
                r#"{{"success":false,"error":"Failed to create runtime: {}"}}"#,
                e
            );
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(async_main()) {
        let response = serde_json::json!({
            "success": false,
            "error": e.to_string()
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&response)
                .unwrap_or_else(|_| format!(r#"{{"success":false,"error":"{}"}}"#, e))
        );
        std::process::exit(2);
    }
}

async fn async_main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let app = App::new(cli.index.as_deref())?;

    use refscope::cli::commands;
    match cli.command {
        Commands::File(args) => commands::file::execute(args, &app, cli.format).await,
        Commands::Folder(args) => commands::folder::execute(args, &app, cli.format).await,
    }
}
