//! Watch-mode polling loop.
//!
//! Re-fetches the statistics payload on a fixed interval and redraws the
//! terminal dashboard after every completed poll. The timer starts with the
//! loop and stops on Ctrl-C; a failed poll keeps the stale dashboard on
//! screen with an error panel.

use crate::api::StatsClient;
use crate::dashboard::state::{Action, DashboardState};
use crate::models::Window;
use crate::report::dashboard::{render_dashboard, RenderOptions};
use crate::report::Theme;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

/// Settings for the watch loop.
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Seconds between polls.
    pub interval_seconds: u64,
    /// Suppress the fetch spinner.
    pub quiet: bool,
}

/// Run the polling loop until Ctrl-C.
pub async fn run_watch(
    client: &StatsClient,
    state: &mut DashboardState,
    window: Window,
    render_opts: &RenderOptions,
    theme: &Theme,
    opts: &WatchOptions,
) -> anyhow::Result<()> {
    let mut ticker = interval(Duration::from_secs(opts.interval_seconds));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        "Watching {} every {}s (Ctrl-C to stop)",
        client.base_url(),
        opts.interval_seconds
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                poll_once(client, state, window, opts.quiet).await;
                redraw(state, render_opts, theme);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl-C, stopping watch mode");
                break;
            }
        }
    }

    Ok(())
}

/// Fetch one payload and fold the outcome into the view state.
pub async fn poll_once(
    client: &StatsClient,
    state: &mut DashboardState,
    window: Window,
    quiet: bool,
) {
    // The rolling window moves with the clock, so resolve it per poll.
    let range = window.to_range(Utc::now());
    state.apply(Action::RangeApplied(Some(range)));

    let generation = state.begin_fetch();
    let spinner = if quiet { None } else { Some(fetch_spinner()) };

    let result = client.fetch_report(Some(&range)).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match result {
        Ok(report) => {
            state.apply(Action::FetchSucceeded {
                generation,
                report,
                at: Utc::now(),
            });
        }
        Err(e) => {
            warn!("Fetch failed: {}", e);
            state.apply(Action::FetchFailed {
                generation,
                message: e.to_string(),
            });
        }
    }
}

/// Spinner shown while a fetch is in flight.
pub fn fetch_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Fetching test statistics...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn redraw(state: &DashboardState, render_opts: &RenderOptions, theme: &Theme) {
    // Clear the screen and home the cursor before each frame.
    print!("\x1b[2J\x1b[H");
    println!("{}", render_dashboard(state, render_opts, theme));
}
