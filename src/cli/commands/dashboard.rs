//! Dashboard command implementation.

use anyhow::{Context, Result};
use chrono::Local;
use daytrader_analysis::ScanOutcome;
use daytrader_monitor::{Dashboard, DashboardState};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;

use crate::cli::context::AppContext;
use crate::cli::DashboardArgs;

const UI_TICK_MS: u64 = 250;
const KEEP_MESSAGES: usize = 50;

pub async fn run(args: DashboardArgs, ctx: Arc<AppContext>) -> Result<()> {
    let queries = if args.queries.is_empty() {
        ctx.config.dashboard.watchlist.clone()
    } else {
        args.queries
    };
    if queries.is_empty() {
        anyhow::bail!("Nothing to watch: pass queries or set dashboard.watchlist");
    }
    info!(?queries, "Starting dashboard");

    let state = Arc::new(Mutex::new(DashboardState {
        currency: ctx.config.analysis.currency.clone(),
        ..Default::default()
    }));

    let refresher = {
        let state = Arc::clone(&state);
        let ctx = Arc::clone(&ctx);
        let period = Duration::from_secs(ctx.config.dashboard.refresh_secs);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                if let Ok(mut s) = state.lock() {
                    s.refreshing = true;
                }

                let rows = ctx.scan(&queries, ctx.config.lookup.disambiguation).await;

                if let Ok(mut s) = state.lock() {
                    let now = Local::now();
                    for row in &rows {
                        let symbol = row.symbol.as_deref().unwrap_or(&row.query);
                        match &row.outcome {
                            ScanOutcome::Analyzed { .. } => {}
                            ScanOutcome::NoData => s.push_message(
                                format!("{} {symbol}: no price data", now.format("%H:%M:%S")),
                                KEEP_MESSAGES,
                            ),
                            ScanOutcome::Failed(msg) => s.push_message(
                                format!("{} {symbol}: {msg}", now.format("%H:%M:%S")),
                                KEEP_MESSAGES,
                            ),
                        }
                    }
                    s.rows = rows;
                    s.last_refresh = Some(now);
                    s.refreshing = false;
                }
            }
        })
    };

    let ui_state = Arc::clone(&state);
    let result = tokio::task::spawn_blocking(move || {
        Dashboard::new(UI_TICK_MS).run(|| {
            ui_state
                .lock()
                .map(|s| s.clone())
                .unwrap_or_default()
        })
    })
    .await;

    refresher.abort();
    result
        .context("Dashboard task failed")?
        .context("Terminal error")?;
    Ok(())
}
