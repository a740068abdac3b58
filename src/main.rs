//! fraudwatch CLI entry point

use anyhow::Result;
use clap::Parser;
use crossterm::event::{Event, KeyEventKind};
use fraudwatch::ui::{render_app, TUI};
use fraudwatch::{App, Config, View};
use std::path::PathBuf;

/// Terminal dashboard for the anti-fraud monitoring backend
#[derive(Parser, Debug)]
#[command(name = "fraudwatch", version, about)]
struct Cli {
    /// Base URL of the monitoring backend
    #[arg(long)]
    base_url: Option<String>,

    /// Seconds between automatic refreshes of the active view
    #[arg(long)]
    refresh_secs: Option<u64>,

    /// Path to the config file (default: ~/.fraudwatch/config.yml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("🛡 fraudwatch v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(refresh_secs) = cli.refresh_secs {
        config.refresh_secs = refresh_secs;
    }

    log::info!(
        "Backend: {} (refresh every {}s)",
        config.base_url,
        config.refresh_secs
    );

    let mut app = App::new(config)?;
    app.switch_view(View::Dashboard);

    let mut tui = TUI::new()?;

    loop {
        tui.terminal().draw(|f| render_app(f, &app))?;

        if App::should_poll_input()? {
            if let Event::Key(key) = App::read_event()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        app.tick();

        if app.should_quit {
            break;
        }
    }

    log::info!("Shutting down");
    Ok(())
}
