mod script;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use packagepro_config::AppConfig;
use packagepro_core::{EditorSession, KeyboardHub};

/// Replays a scripted PackagePro editing session and prints the outcome.
#[derive(Parser, Debug)]
#[command(name = "packagepro", version, about)]
struct Cli {
    /// JSON script of editor actions.
    script: PathBuf,

    /// Config file to use instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of snapshots kept.
    #[arg(long)]
    capacity: Option<usize>,

    /// Override the debounce window in milliseconds.
    #[arg(long = "debounce-ms")]
    debounce_ms: Option<u64>,

    /// Stop right after the last action instead of letting pending edits settle.
    #[arg(long)]
    no_settle: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting packagepro");

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let mut config = AppConfig::load_or_create(&config_path);
    if let Some(capacity) = cli.capacity {
        config.history_capacity = capacity;
    }
    if let Some(debounce_ms) = cli.debounce_ms {
        config.debounce_ms = debounce_ms;
    }
    config.sanitize();
    tracing::info!(
        capacity = config.history_capacity,
        debounce_ms = config.debounce_ms,
        "Loaded config from {}",
        config_path.display()
    );

    let actions = script::load(&cli.script)?;

    let hub = KeyboardHub::new();
    let mut session = EditorSession::from_config(&config).on_state_change(|state| {
        tracing::info!(project = %state.project_name, "State restored");
    });
    session.attach_keyboard(&hub);

    let mut player = script::Player::new(&mut session, Instant::now());
    player.run(&actions)?;
    if !cli.no_settle {
        player.wait(Duration::from_millis(config.debounce_ms));
    }

    let report = player.report();
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    println!("{json}");

    Ok(())
}
