//! Fixtures shared by the service tests

use std::cell::RefCell;
use std::fs;
use std::io;
use std::sync::{Arc, Mutex};

use crate::models::{Candle, CandleTable, ChartSpec};
use crate::services::chart_service::ChartRenderer;
use crate::utils::errors::PlotError;
use crate::utils::logging::env_filter;
use crate::utils::time::close_time_for_event;

/// Minute candle closing at `time` + 999ms
pub fn candle_at(time: &str, close_price: f64) -> Candle {
    let close_time = close_time_for_event(time).expect("fixture time");
    Candle {
        open_time: close_time.timestamp_millis() - 59_999,
        open_price: close_price,
        high_price: close_price,
        low_price: close_price,
        close_price,
        volume: 1.0,
        close_time,
        quote_asset_volume: close_price,
        number_of_trades: 1,
        taker_buy_base_asset_volume: 0.5,
        taker_buy_quote_asset_volume: close_price / 2.0,
        ignore: false,
    }
}

pub fn table_from(rows: Vec<Candle>) -> CandleTable {
    CandleTable::new(rows)
}

/// `count` consecutive minute candles starting at 2023-01-05 00:00:00
pub fn minute_table(count: usize) -> CandleTable {
    let start = close_time_for_event("2023-01-05 00:00:00").expect("fixture time");
    let rows = (0..count)
        .map(|i| {
            let close_time = start + chrono::Duration::minutes(i as i64);
            Candle {
                close_time,
                ..candle_at("2023-01-05 00:00:00", 20000.0 + i as f64)
            }
        })
        .collect();
    CandleTable::new(rows)
}

/// Keeps every spec and touches the output file instead of drawing it
#[derive(Default)]
pub struct RecordingRenderer {
    pub rendered: RefCell<Vec<ChartSpec>>,
}

impl ChartRenderer for RecordingRenderer {
    fn render(&self, spec: &ChartSpec) -> Result<(), PlotError> {
        fs::write(&spec.output_path, b"").map_err(|e| PlotError::io(&spec.output_path, e))?;
        self.rendered.borrow_mut().push(spec.clone());
        Ok(())
    }
}

/// Collects formatted log lines
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut bytes) = self.0.lock() {
            bytes.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` under the crate's filter with `directives` and return what was logged
pub fn capture_logs(directives: &str, f: impl FnOnce()) -> String {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let bytes = logs.0.lock().map(|b| b.clone()).unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}
