use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing::{error, info, warn};
use via_stitch::server::handlers::handle_load;
use via_stitch::server::{handle_line, init_logging, ServerState};

/// JSON-RPC server for planning via stitching on board snapshots
#[derive(Parser, Debug)]
#[command(name = "stitch_server", version, about)]
struct Cli {
    /// Board snapshot to load before reading requests
    #[arg(short, long)]
    board: Option<String>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    info!("Starting via stitching server...");
    let mut state = ServerState::new();

    if let Some(path) = cli.board {
        let params = serde_json::json!({ "file_path": path });
        let response = handle_load(&mut state, None, Some(params));
        if let Some(err) = response.error {
            warn!("Startup load failed: {}", err.message);
        }
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("Error reading stdin: {}", e);
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(&mut state, &line);
        let response_json = serde_json::to_string(&response)?;
        writeln!(stdout, "{}", response_json)?;
        stdout.flush()?;
    }

    if state.dirty {
        warn!("Exiting with unsaved changes");
    }
    info!("Shutting down...");
    Ok(())
}
