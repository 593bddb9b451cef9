//! storefront-router
//!
//! Inspect and exercise a storefront route file from the command line.
//!
//! # Architecture Overview
//!
//! ```text
//!   routes.toml ──▶ config ──▶ RouteTree ──▶ RouteTable ◀── watcher (hot reload)
//!                                               │
//!                                               ▼
//!   steps / path ──▶ MemoryHistory ──▶ NavigationController ──▶ MatchResult ──▶ stdout (JSON)
//! ```
//!
//! # Commands
//! - `check`: validate the route file and print the tree
//! - `resolve PATH`: print the match chain for one path
//! - `simulate STEP...`: replay navigation steps, printing each state
//! - `watch PATH`: re-resolve PATH whenever the route file changes

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;

use storefront_router::config::watcher::{apply_reload, ConfigWatcher};
use storefront_router::config::{load_config, RouterConfig};
use storefront_router::navigation::script::Step;
use storefront_router::navigation::{MemoryHistory, NavigationController};
use storefront_router::observability::logging;
use storefront_router::routing::{normalize, MatchResult, RouteTable};

#[derive(Parser)]
#[command(name = "storefront-router")]
#[command(about = "Inspect and exercise a storefront route file", long_about = None)]
struct Cli {
    /// Route file to load.
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    /// Override the configured log level.
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the route file and print the route tree
    Check,
    /// Print the match chain for a path
    Resolve { path: String },
    /// Replay navigation steps (push:PATH, replace:PATH, back, forward, go:N)
    Simulate {
        #[arg(required = true, allow_hyphen_values = true)]
        steps: Vec<String>,
    },
    /// Re-resolve a path whenever the route file changes
    Watch { path: String },
}

#[derive(Serialize)]
struct Resolution<'a> {
    path: String,
    matched: Option<&'a MatchResult<String>>,
}

#[derive(Serialize)]
struct Snapshot {
    step: String,
    changed: bool,
    path: String,
    revision: u64,
    history_index: usize,
    matched: Option<MatchResult<String>>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.observability.log_level);
    logging::init(level);

    match cli.command {
        Commands::Check => check(&config)?,
        Commands::Resolve { path } => resolve(&config, &path)?,
        Commands::Simulate { steps } => simulate(&config, &steps)?,
        Commands::Watch { path } => watch(&cli.config, &config, &path).await?,
    }

    Ok(())
}

fn check(config: &RouterConfig) -> Result<(), Box<dyn Error>> {
    let tree = config.route_tree()?;
    tracing::info!(nodes = tree.node_count(), "Route tree is valid");
    println!("{}", serde_json::to_string_pretty(&tree)?);
    Ok(())
}

fn resolve(config: &RouterConfig, path: &str) -> Result<(), Box<dyn Error>> {
    let tree = config.route_tree()?;
    let matched = tree.resolve(path);
    print_resolution(path, matched.as_ref())
}

fn print_resolution(path: &str, matched: Option<&MatchResult<String>>) -> Result<(), Box<dyn Error>> {
    let resolution = Resolution {
        path: normalize(path),
        matched,
    };
    println!("{}", serde_json::to_string_pretty(&resolution)?);
    Ok(())
}

fn simulate(config: &RouterConfig, raw_steps: &[String]) -> Result<(), Box<dyn Error>> {
    let steps = raw_steps
        .iter()
        .map(|raw| raw.parse::<Step>())
        .collect::<Result<Vec<_>, _>>()?;

    let table = RouteTable::new(config.route_tree()?);
    let history = MemoryHistory::with_capacity(&config.navigation.initial_path, config.navigation.event_capacity);
    let mut controller = NavigationController::new(history.clone(), table);

    let mut snapshots = vec![snapshot("start", false, &history, &controller)];
    for (raw, step) in raw_steps.iter().zip(&steps) {
        let changed = step.run(&history, &mut controller);
        snapshots.push(snapshot(raw, changed, &history, &controller));
    }

    println!("{}", serde_json::to_string_pretty(&snapshots)?);
    Ok(())
}

fn snapshot(
    step: &str,
    changed: bool,
    history: &MemoryHistory,
    controller: &NavigationController<String, MemoryHistory>,
) -> Snapshot {
    Snapshot {
        step: step.to_string(),
        changed,
        path: controller.current_path(),
        revision: controller.revision(),
        history_index: history.index(),
        matched: controller.matched().cloned(),
    }
}

async fn watch(config_path: &Path, config: &RouterConfig, path: &str) -> Result<(), Box<dyn Error>> {
    let table = RouteTable::new(config.route_tree()?);
    let mut controller = NavigationController::new(MemoryHistory::new(path), table.clone());
    print_resolution(path, controller.matched())?;

    let (watcher, mut updates) = ConfigWatcher::new(config_path);
    let _watcher = watcher.run()?;

    loop {
        tokio::select! {
            Some(config) = updates.recv() => {
                if apply_reload(&table, &config) {
                    controller.refresh();
                    print_resolution(path, controller.matched())?;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping watcher");
                break;
            }
        }
    }

    Ok(())
}
