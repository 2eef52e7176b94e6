//! Kline models

use std::ops::Range;

use chrono::{DateTime, Utc};

/// Number of columns in a Binance kline CSV row
pub const CANDLE_COLUMNS: usize = 12;

/// One kline as published in the Binance monthly dumps
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub open_time: i64,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
    pub volume: f64,
    pub close_time: DateTime<Utc>,
    pub quote_asset_volume: f64,
    pub number_of_trades: u64,
    pub taker_buy_base_asset_volume: f64,
    pub taker_buy_quote_asset_volume: f64,
    pub ignore: bool,
}

/// All candles of one symbol/interval/month, in file order
#[derive(Debug, Clone, Default)]
pub struct CandleTable {
    rows: Vec<Candle>,
}

impl CandleTable {
    pub fn new(rows: Vec<Candle>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[Candle] {
        &self.rows
    }

    /// Rows in `range`, clipped to the table
    pub fn slice(&self, range: Range<usize>) -> &[Candle] {
        let end = range.end.min(self.rows.len());
        let start = range.start.min(end);
        &self.rows[start..end]
    }
}
