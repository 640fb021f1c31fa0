//! TestPulse - Terminal dashboard for test-execution statistics
//!
//! A CLI tool that fetches pass/fail statistics from an analytics endpoint,
//! aggregates them per workspace, and renders a terminal dashboard or
//! exports the numbers as CSV/JSON.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (connection, config, fetch failure, etc.)
//!   2 - Overall health at or below the --fail-on threshold

mod analysis;
mod api;
mod cli;
mod config;
mod dashboard;
mod models;
mod report;

use anyhow::{bail, Context, Result};
use api::StatsClient;
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use dashboard::DashboardState;
use dashboard::watch::{poll_once, run_watch, WatchOptions};
use models::{DateRange, HealthStatus, Window};
use report::dashboard::{render_dashboard, Expand, RenderOptions};
use report::Theme;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("TestPulse v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Dashboard failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .testpulse.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".testpulse.toml");

    if path.exists() {
        eprintln!("⚠️  .testpulse.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .testpulse.toml")?;

    println!("✅ Created .testpulse.toml with default settings.");
    println!("   Edit it to set the endpoint URL, window, and exclusions.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the dashboard workflow. Returns exit code (0, 1, or 2).
async fn run(args: Args) -> Result<i32> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    if config.api.base_url.is_empty() {
        bail!("No endpoint URL configured. Pass --url, set TESTPULSE_URL, or add [api] base_url to .testpulse.toml");
    }

    let window = resolve_window(&args, &config)?;
    let theme = Theme::select(config.dashboard.dark, args.no_color);

    let excluded: HashSet<String> = config
        .dashboard
        .excluded_workspaces
        .iter()
        .cloned()
        .collect();
    if !excluded.is_empty() {
        info!("Excluding {} workspace(s) from analysis", excluded.len());
    }

    let client = StatsClient::new(&config.api.base_url, config.api.timeout_seconds);
    let mut state = DashboardState::new(excluded);

    let expand = if args.details {
        Expand::All
    } else if let Some(ref id) = args.expand {
        Expand::One(id.clone())
    } else {
        Expand::None
    };
    let render_opts = RenderOptions {
        window_label: window.label(),
        expand,
    };

    // Watch mode: poll until Ctrl-C, redrawing after every poll
    if args.watch {
        let watch_opts = WatchOptions {
            interval_seconds: config.dashboard.interval_seconds,
            quiet: args.quiet,
        };
        run_watch(&client, &mut state, window, &render_opts, &theme, &watch_opts).await?;
        return Ok(0);
    }

    // One-shot: fetch once, then render or export
    poll_once(&client, &mut state, window, args.quiet).await;

    match args.format {
        OutputFormat::Dashboard => {
            println!("{}", render_dashboard(&state, &render_opts, &theme));
            if state.last_error().is_some() {
                return Ok(1);
            }
        }
        OutputFormat::Csv | OutputFormat::Json => {
            let report = match (state.report(), state.last_error()) {
                (Some(report), _) => report,
                (None, Some(message)) => bail!("Fetch failed: {}", message),
                (None, None) => bail!("No data received from endpoint"),
            };

            let workspaces = analysis::summarize_workspaces(report, state.excluded());
            let output = config.export.output.as_ref().map(PathBuf::from);

            if args.format == OutputFormat::Csv {
                match output {
                    Some(ref path) => {
                        report::csv::write_csv(&workspaces, path)?;
                        println!("✅ CSV saved to: {}", path.display());
                    }
                    None => print!("{}", report::csv::generate_csv(&workspaces)),
                }
            } else {
                let overall = analysis::summarize_overall(report, state.excluded());
                let breakdown = analysis::status_breakdown(&workspaces);
                let window_label = window.label();
                let snapshot = report::json::Snapshot {
                    generated_at: Utc::now(),
                    window: &window_label,
                    overall: &overall,
                    workspaces: &workspaces,
                    breakdown: &breakdown,
                };
                match output {
                    Some(ref path) => {
                        report::json::write_json(&snapshot, path)?;
                        println!("✅ JSON saved to: {}", path.display());
                    }
                    None => println!("{}", report::json::generate_json(&snapshot)?),
                }
            }
        }
    }

    // Check --fail-on threshold
    if let Some(fail_level) = args.fail_on {
        if let Some(report) = state.report() {
            let overall = analysis::summarize_overall(report, state.excluded());
            let threshold: HealthStatus = fail_level.into();

            if overall.status <= threshold {
                eprintln!(
                    "\n⛔ Overall health is {} (at or below {}). Failing (exit code 2).",
                    overall.status, threshold
                );
                return Ok(2);
            }
        }
    }

    Ok(0)
}

/// Build the query window from explicit dates or the lookback days.
fn resolve_window(args: &Args, config: &Config) -> Result<Window> {
    if let (Some(start), Some(end)) = (args.start_date, args.end_date) {
        let range = DateRange::from_dates(start, end)
            .with_context(|| format!("Invalid date range {} to {}", start, end))?;
        return Ok(Window::Explicit(range));
    }
    Ok(Window::LastDays(config.dashboard.days))
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .testpulse.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
