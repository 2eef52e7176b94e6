//! Chart generation models

use std::ops::Range;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// A single data point on a price chart
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn label(&self) -> &'static str {
        match self {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        }
    }
}

/// Candle matched to one side of a trade
#[derive(Debug, Clone, PartialEq)]
pub struct CandleMatch {
    pub index: usize,
    pub close_time: DateTime<Utc>,
    pub close_price: f64,
}

/// Half-open candle index range `[min_index, max_index)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotWindow {
    pub min_index: usize,
    pub max_index: usize,
}

impl PlotWindow {
    pub fn range(&self) -> Range<usize> {
        self.min_index..self.max_index
    }

    /// Empty when an inverted trade pushes `max_index` to or below `min_index`
    pub fn is_empty(&self) -> bool {
        self.max_index <= self.min_index
    }
}

/// Labeled marker with an arrow from `text_at` down to `point`
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub side: TradeSide,
    pub text: String,
    pub point: PricePoint,
    pub text_at: PricePoint,
}

/// Everything drawn for one trade, computed before any pixels are touched
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub series: Vec<PricePoint>,
    pub y_range: (f64, f64),
    pub buy: Annotation,
    pub sell: Annotation,
    pub trailing_stops: Vec<PricePoint>,
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
}
