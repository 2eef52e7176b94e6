use std::fmt;
use std::fs;

use tracing::{debug, info, warn};

use crate::config::PlotConfig;
use crate::dataset::Dataset;
use crate::models::{CandleTable, ChartSpec, PricePoint, TradeEvent, TradeSide};
use crate::services::chart_service::{build_chart_spec, ChartRenderer};
use crate::services::{match_service, window_service};
use crate::utils::errors::PlotError;
use crate::utils::logging::SKIP_TARGET;
use crate::utils::time::close_time_for_event;

/// Why a trade event produced no chart
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NoMatch(TradeSide),
    InvalidTime { field: &'static str, value: String },
    EmptyWindow { min_index: usize, max_index: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoMatch(TradeSide::Buy) => write!(f, "No buy Data"),
            SkipReason::NoMatch(TradeSide::Sell) => write!(f, "No sell Data"),
            SkipReason::InvalidTime { field, value } => {
                write!(f, "Invalid {} '{}'", field, value)
            }
            SkipReason::EmptyWindow { min_index, max_index } => {
                write!(f, "Empty plot window [{}, {})", min_index, max_index)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlotOutcome {
    Rendered(ChartSpec),
    Skipped(SkipReason),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub rendered: usize,
    pub skipped: usize,
}

/// Create the output directory, dropping PNGs left by a previous run
pub fn prepare_output_dir(config: &PlotConfig) -> Result<(), PlotError> {
    let dir = &config.output_dir;
    fs::create_dir_all(dir).map_err(|e| PlotError::io(dir, e))?;

    if !config.clear_stale_plots {
        return Ok(());
    }

    let entries = fs::read_dir(dir).map_err(|e| PlotError::io(dir, e))?;
    let mut removed = 0;
    for entry in entries {
        let path = entry.map_err(|e| PlotError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "png") {
            fs::remove_file(&path).map_err(|e| PlotError::io(&path, e))?;
            removed += 1;
        }
    }
    if removed > 0 {
        debug!("Removed {} stale plots from {}", removed, dir.display());
    }
    Ok(())
}

fn parse_trailing_stops(event: &TradeEvent) -> Result<Vec<PricePoint>, SkipReason> {
    event
        .trailing_sell
        .iter()
        .map(|point| {
            close_time_for_event(&point.time)
                .map(|timestamp| PricePoint {
                    timestamp,
                    price: point.stop_price,
                })
                .map_err(|_| SkipReason::InvalidTime {
                    field: "trailingSell.time",
                    value: point.time.clone(),
                })
        })
        .collect()
}

/// Match, window and render a single trade event
///
/// Unmatched or malformed events come back as `Skipped`; only load, render
/// and I/O failures are errors.
pub fn plot_trade<R: ChartRenderer>(
    config: &PlotConfig,
    candles: &CandleTable,
    event: &TradeEvent,
    renderer: &R,
) -> Result<PlotOutcome, PlotError> {
    let buy = match match_service::match_event_time(candles, &event.buy_time) {
        Ok(Some(found)) => found,
        Ok(None) => return Ok(PlotOutcome::Skipped(SkipReason::NoMatch(TradeSide::Buy))),
        Err(_) => {
            return Ok(PlotOutcome::Skipped(SkipReason::InvalidTime {
                field: "buyTime",
                value: event.buy_time.clone(),
            }))
        }
    };

    let sell = match match_service::match_event_time(candles, &event.sell_time) {
        Ok(Some(found)) => found,
        Ok(None) => return Ok(PlotOutcome::Skipped(SkipReason::NoMatch(TradeSide::Sell))),
        Err(_) => {
            return Ok(PlotOutcome::Skipped(SkipReason::InvalidTime {
                field: "sellTime",
                value: event.sell_time.clone(),
            }))
        }
    };

    let trailing_stops = match parse_trailing_stops(event) {
        Ok(points) => points,
        Err(reason) => return Ok(PlotOutcome::Skipped(reason)),
    };

    let window = window_service::compute_window(buy.index, sell.index, config.extra_rows, candles.len());
    debug!(
        "Trade {}: buy row {}, sell row {}, window [{}, {})",
        event.buy_id, buy.index, sell.index, window.min_index, window.max_index
    );

    if window.is_empty() {
        return Ok(PlotOutcome::Skipped(SkipReason::EmptyWindow {
            min_index: window.min_index,
            max_index: window.max_index,
        }));
    }

    let rows = candles.slice(window.range());
    let spec = match build_chart_spec(config, event, rows, &buy, &sell, trailing_stops) {
        Some(spec) => spec,
        None => {
            return Ok(PlotOutcome::Skipped(SkipReason::EmptyWindow {
                min_index: window.min_index,
                max_index: window.max_index,
            }))
        }
    };

    renderer.render(&spec)?;
    Ok(PlotOutcome::Rendered(spec))
}

/// Plot every trade event in input order
pub fn plot_all<R: ChartRenderer>(
    config: &PlotConfig,
    dataset: &Dataset,
    renderer: &R,
) -> Result<RunSummary, PlotError> {
    prepare_output_dir(config)?;

    let mut summary = RunSummary::default();
    for event in &dataset.events {
        match plot_trade(config, &dataset.candles, event, renderer)? {
            PlotOutcome::Rendered(spec) => {
                info!("Trade {}: chart written to {}", event.buy_id, spec.output_path.display());
                summary.rendered += 1;
            }
            PlotOutcome::Skipped(reason) => {
                warn!(target: SKIP_TARGET, buy_id = %event.buy_id, "{}", reason);
                summary.skipped += 1;
            }
        }
    }

    info!(
        "Plotted {} of {} trades ({} skipped)",
        summary.rendered,
        dataset.events.len(),
        summary.skipped
    );
    Ok(summary)
}
