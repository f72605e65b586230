use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use order_board::board_actor::BoardSnapshot;
use order_board::domain::BoardLayout;
use order_board::render::{render_board, CLEAR_SCREEN};
use order_board::runtime::{setup_tracing, BoardSettings, BoardSystem};
use order_board::source::JsonFileSource;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "order-board", version, about = "Fulfillment status board for counter orders")]
struct Cli {
    /// JSON snapshot of the logistics view (array of row objects)
    #[arg(long, value_name = "PATH")]
    rows: PathBuf,

    /// Settings file (TOML); built-in defaults when omitted
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Only show these branches (repeatable); overrides the settings file
    #[arg(long = "branch", value_name = "NAME")]
    branches: Vec<String>,

    /// Board variant; overrides the settings file
    #[arg(long, value_enum)]
    layout: Option<LayoutArg>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Render a single board and exit
    #[arg(long)]
    once: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    Customer,
    Operations,
}

impl From<LayoutArg> for BoardLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Customer => BoardLayout::Customer,
            LayoutArg::Operations => BoardLayout::Operations,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => BoardSettings::load(path).map_err(|e| e.to_string())?,
        None => BoardSettings::default(),
    };
    if !cli.branches.is_empty() {
        settings.branches = cli.branches.clone();
    }
    if let Some(layout) = cli.layout {
        settings.layout = layout.into();
    }
    info!(rows = %cli.rows.display(), layout = ?settings.layout, "Starting order board");

    let source = Arc::new(JsonFileSource::new(&cli.rows));
    let system = BoardSystem::new(source, &settings).map_err(|e| e.to_string())?;

    // The actor refreshes before serving its first request, so this is the
    // startup board (or `None` if that refresh failed).
    let mut updates = system.board_client.subscribe();
    let first = system
        .board_client
        .snapshot()
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "Initial refresh failed, see log for details".to_string())?;
    draw(&first, cli.format, !cli.once)?;

    if !cli.once {
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        warn!("Board actor stopped");
                        break;
                    }
                    let latest = updates.borrow_and_update().clone();
                    if let Some(snapshot) = latest {
                        draw(&snapshot, cli.format, true)?;
                    }
                }
                _ = &mut shutdown => {
                    info!("Interrupted");
                    break;
                }
            }
        }
    }

    system.shutdown().await
}

fn draw(snapshot: &BoardSnapshot, format: Format, clear: bool) -> Result<(), String> {
    match format {
        Format::Json => {
            let json = serde_json::to_string_pretty(snapshot).map_err(|e| e.to_string())?;
            println!("{json}");
        }
        Format::Text => {
            // Stage timings belong to the internal board only.
            let timings = match snapshot.board.layout {
                BoardLayout::Operations => snapshot.timings.as_slice(),
                BoardLayout::Customer => &[],
            };
            if clear {
                print!("{CLEAR_SCREEN}");
            }
            print!("{}", render_board(&snapshot.board, timings));
        }
    }
    Ok(())
}
