//! Build-time configuration for a plotting run

use std::path::{Path, PathBuf};

/// Extra candle rows shown on each side of a trade
pub const EXTRA_ROWS: usize = 600;

/// Trade event list written by the trading bot
pub const DATA_FILE: &str = "data.json";

/// Directory the PNG files are written to
pub const PLOTS_DIRECTORY: &str = "plots";

pub const DATASETS_DIRECTORY: &str = "datasets";
pub const CANDLE_SYMBOL: &str = "BTCUSDT";
pub const CANDLE_INTERVAL: &str = "1m";
pub const DATASET_MONTH: &str = "2023-01";

pub const CHART_WIDTH: u32 = 1024;
pub const CHART_HEIGHT: u32 = 768;

/// Identifies one monthly Binance kline dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSpec {
    pub directory: PathBuf,
    pub symbol: String,
    pub interval: String,
    pub month: String,
}

impl DatasetSpec {
    /// `<directory>/<SYMBOL>-<INTERVAL>-<YYYY-MM>.csv`
    pub fn path(&self) -> PathBuf {
        self.directory
            .join(format!("{}-{}-{}.csv", self.symbol, self.interval, self.month))
    }
}

impl Default for DatasetSpec {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DATASETS_DIRECTORY),
            symbol: CANDLE_SYMBOL.to_string(),
            interval: CANDLE_INTERVAL.to_string(),
            month: DATASET_MONTH.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub extra_rows: usize,
    pub data_file: PathBuf,
    pub dataset: DatasetSpec,
    pub output_dir: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Remove `*.png` left in `output_dir` by a previous run
    pub clear_stale_plots: bool,
}

impl PlotConfig {
    pub fn dataset_file(&self) -> PathBuf {
        self.dataset.path()
    }

    /// `<output_dir>/buy_<id>.png`
    pub fn output_path(&self, buy_id: &str) -> PathBuf {
        plot_file_path(&self.output_dir, buy_id)
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            extra_rows: EXTRA_ROWS,
            data_file: PathBuf::from(DATA_FILE),
            dataset: DatasetSpec::default(),
            output_dir: PathBuf::from(PLOTS_DIRECTORY),
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
            clear_stale_plots: true,
        }
    }
}

pub fn plot_file_path(output_dir: &Path, buy_id: &str) -> PathBuf {
    output_dir.join(format!("buy_{}.png", buy_id))
}
