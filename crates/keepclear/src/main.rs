//! Binary entrypoint for keepclear.
use std::{io, path::PathBuf, process, sync::Arc};

use clap::{Parser, Subcommand};
use config::{Config, Overrides};
use keepclear_engine::{Placer, ensure_accessibility};
use logging::LogArgs;
use mac_winops::ops::{RealWinOps, WinOps};
use thiserror::Error;
use tokio::{runtime::Builder, signal};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    name = "keepclear",
    about = "Keep windows out of the right-hand margin of a display",
    version
)]
/// Command-line interface for the `keepclear` binary.
struct Cli {
    /// Optional subcommand; without one, run the placement loop.
    #[command(subcommand)]
    command: Option<Command>,

    /// Optional path to the config file (defaults to ~/.keepclear/config.ron)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Name of the display to manage (overrides the config file)
    #[arg(long, value_name = "NAME", global = true)]
    display: Option<String>,

    /// Milliseconds between placement passes
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// Usable fraction of the display width, in (0, 1]
    #[arg(long, value_name = "FRACTION")]
    margin: Option<f64>,

    /// Log corrections without moving any window
    #[arg(long)]
    dry_run: bool,

    /// Run a single pass and exit
    #[arg(long)]
    once: bool,

    /// Logging controls
    #[command(flatten)]
    log: LogArgs,
}

#[derive(Subcommand, Debug)]
/// Top-level CLI subcommands.
enum Command {
    /// Load and validate the configuration then exit.
    Check {
        /// Print the effective configuration as JSON
        #[arg(long)]
        dump: bool,
    },
    /// List connected displays and their names, marking the target, and
    /// report whether Accessibility is granted (without prompting).
    Displays,
}

/// Failures that end the process with status 1.
#[derive(Debug, Error)]
enum AppError {
    /// Startup gate or configuration failure.
    #[error(transparent)]
    Engine(#[from] keepclear_engine::Error),
    /// Configuration failure outside the engine.
    #[error("{}", .0.pretty())]
    Config(#[from] config::Error),
    /// Runtime construction failed.
    #[error("failed to start runtime: {0}")]
    Runtime(#[from] io::Error),
    /// Configuration could not be rendered.
    #[error("failed to serialize config: {0}")]
    Json(#[from] serde_json::Error),
}

impl Cli {
    /// Config values supplied on the command line.
    fn overrides(&self) -> Overrides {
        Overrides {
            target_display: self.display.clone(),
            interval_ms: self.interval_ms,
            margin_fraction: self.margin,
            dry_run: self.dry_run,
        }
    }
}

/// Parse arguments, install logging, and exit 1 on any fatal error.
fn main() {
    let cli = Cli::parse();
    logging::init(&cli.log.spec());
    if let Err(e) = run(&cli) {
        eprintln!("{e}");
        process::exit(1);
    }
}

/// Load configuration and dispatch to the selected mode.
fn run(cli: &Cli) -> Result<(), AppError> {
    let cfg = config::load(cli.config.as_deref())?.with_overrides(&cli.overrides())?;
    debug!(?cfg, "effective config");
    match &cli.command {
        Some(Command::Check { dump }) => check(&cfg, *dump),
        Some(Command::Displays) => {
            print_displays(&RealWinOps, &cfg);
            Ok(())
        }
        None => {
            let ops: Arc<dyn WinOps> = Arc::new(RealWinOps);
            ensure_accessibility(ops.as_ref())?;
            place(ops, &cfg, cli.once)
        }
    }
}

/// Validate configuration, optionally printing it as JSON.
fn check(cfg: &Config, dump: bool) -> Result<(), AppError> {
    if dump {
        println!("{}", serde_json::to_string_pretty(cfg)?);
    } else {
        println!("config ok");
    }
    Ok(())
}

/// Print permission state and every display, marking the target.
fn print_displays(ops: &dyn WinOps, cfg: &Config) {
    let granted = if permissions::accessibility_ok() {
        "granted"
    } else {
        "not granted"
    };
    println!("accessibility: {granted}");
    let displays = ops.list_displays(cfg.max_displays);
    if displays.is_empty() {
        println!("no displays found");
        return;
    }
    for d in displays {
        let mark = if d.name == cfg.target_display { '*' } else { ' ' };
        println!(
            "{} {:>10}  {:<32} x={} y={} w={} h={}",
            mark, d.id, d.name, d.frame.x, d.frame.y, d.frame.w, d.frame.h
        );
    }
}

/// Run the placement loop on a current-thread runtime owned by the main
/// thread, which AppKit display queries require. Ctrl-C stops it cleanly.
fn place(ops: Arc<dyn WinOps>, cfg: &Config, once: bool) -> Result<(), AppError> {
    info!(
        target_display = %cfg.target_display,
        interval_ms = cfg.interval_ms,
        margin_fraction = cfg.margin_fraction,
        dry_run = cfg.dry_run,
        "keepclear starting"
    );
    let placer = Placer::new(ops, cfg);
    if once {
        let report = placer.tick();
        info!(?report, "single pass complete");
        return Ok(());
    }

    let rt = Builder::new_current_thread().enable_all().build()?;
    rt.block_on(async {
        let cancel = CancellationToken::new();
        let on_signal = cancel.clone();
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                info!("interrupt received; shutting down");
                on_signal.cancel();
            }
        });
        placer.run(cancel).await;
    });
    Ok(())
}
