//! CLI binary for wisp.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wisp::{SearchEngine, Settings};

/// Wisp: a terminal omnibar with live search suggestions.
#[derive(Parser)]
#[command(name = "wisp", version, about)]
struct Cli {
    /// Path to TOML settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// List the available search engines and exit.
    #[arg(long)]
    engines: bool,

    /// Query to pre-fill the bar with.
    query: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.engines {
        list_engines();
        return Ok(());
    }

    // The terminal belongs to the UI, so logs go to a daily file under
    // the data directory instead of stderr. Guard must outlive main.
    let _log_guard = init_logging();

    let settings_path = match cli.config {
        Some(path) => path,
        None => Settings::default_config_path(),
    };
    let settings = Settings::load_or_default(&settings_path);
    tracing::info!(path = %settings_path.display(), "starting wisp");

    wisp::omnibar::run(settings, settings_path, cli.query).await?;
    Ok(())
}

fn list_engines() {
    println!("Available engines (settings key in brackets):");
    for engine in SearchEngine::all() {
        println!("  {:<16} [{}]", engine.name(), engine.key());
    }
}

fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let logs_dir = wisp::wisp_dirs::logs_dir();
    if let Err(e) = std::fs::create_dir_all(&logs_dir) {
        eprintln!("wisp: cannot create log directory {}: {e}", logs_dir.display());
        return None;
    }
    let appender = tracing_appender::rolling::daily(&logs_dir, "wisp.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wisp=info,wisp_suggest=info")),
        )
        .init();
    Some(guard)
}
