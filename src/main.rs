use anyhow::{Context, Result};
use capture_veil::config::{load_config, Config, ConfigOverrides};
use capture_veil::monitor::{CycleReport, Monitor, MonitorSettings, ProbeReport};
use capture_veil::process::ElevationPolicy;
use capture_veil::strategy::{HidingStrategy, StrategyKind};
use capture_veil::system::{Platform, SimulatedDesktop};
use capture_veil::VeilResult;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "capture-veil", version)]
#[command(about = "Hide the windows of a target process from screen capture")]
struct Args {
    /// Configuration file (falls back to $CAPTURE_VEIL_CONFIG, then capture-veil.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Executable name of the target process, e.g. vlc.exe
    #[arg(short, long)]
    target: Option<String>,

    /// Hiding technique: capture-exclusion or transparency-ghost
    #[arg(short, long)]
    strategy: Option<StrategyKind>,

    /// Delay between scan passes
    #[arg(long)]
    interval_ms: Option<u64>,

    /// What to do when not running as administrator: require, warn or ignore
    #[arg(long)]
    elevation: Option<ElevationPolicy>,

    /// Run a single scan pass and exit
    #[arg(long)]
    once: bool,

    /// Try every technique on each target window and print a comparison
    #[arg(long, conflicts_with = "once")]
    probe: bool,

    /// Print reports as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Use a simulated desktop instead of the real one
    #[arg(long)]
    dry_run: bool,

    /// Logging level (RUST_LOG takes precedence)
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            process_name: self.target.clone(),
            strategy: self.strategy,
            scan_interval_ms: self.interval_ms,
            elevation: self.elevation,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref(), &args.overrides())
        .context("Failed to load configuration")?;

    init_tracing(&config.logging.level);
    info!("Starting Capture-Veil v{}", env!("CARGO_PKG_VERSION"));
    info!("Architecture: {}", std::env::consts::ARCH);

    let mut settings = MonitorSettings::from_config(&config)?;
    if args.once {
        settings = settings.with_max_cycles(1);
    }

    if args.dry_run {
        warn!("Dry run: operating on a simulated desktop");
        let desktop = SimulatedDesktop::demo(settings.target.process_name());
        return execute(desktop, settings, &config, &args).await;
    }

    #[cfg(windows)]
    let result = execute(
        capture_veil::windows::NativeSystem::new(),
        settings,
        &config,
        &args,
    )
    .await;

    #[cfg(not(windows))]
    let result: Result<()> = Err(capture_veil::VeilError::UnsupportedPlatform(format!(
        "{} (use --dry-run to simulate)",
        std::env::consts::OS
    ))
    .into());

    result
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn execute<P: Platform>(
    platform: P,
    settings: MonitorSettings,
    config: &Config,
    args: &Args,
) -> Result<()> {
    let mut monitor = Monitor::new(platform, settings);

    if args.probe {
        monitor.initialize()?;
        let strategies = StrategyKind::ALL
            .iter()
            .map(|kind| kind.build(&config.strategy))
            .collect::<VeilResult<Vec<Box<dyn HidingStrategy>>>>()?;

        let reports = monitor.probe(&strategies);
        if reports.is_empty() {
            info!(
                "No windows of {} found",
                monitor.settings().target.process_name()
            );
        }
        if args.json {
            emit_json(&reports);
        } else {
            print_probe(&reports);
        }
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
            trigger.cancel();
        }
    });

    let json = args.json;
    let summary = monitor
        .run_with(cancel, |report: &CycleReport| {
            if json {
                emit_json(report);
            }
        })
        .await?;

    if json {
        emit_json(&summary);
    }
    Ok(())
}

/// One compact JSON document per line
fn emit_json<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(line) => println!("{}", line),
        Err(e) => warn!("Failed to serialize report: {}", e),
    }
}

fn print_probe(reports: &[ProbeReport]) {
    for report in reports {
        println!(
            "{} (PID {}, {})",
            report.window, report.pid, report.process_name
        );
        for result in &report.results {
            println!("  {:<20} {}", result.strategy.to_string(), result.outcome);
        }
    }
}
