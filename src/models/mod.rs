//! Data models for the plotting pipeline
//!
//! Input records (candles, trade events) and the values derived from them
//! on the way to a rendered chart.

pub mod candle;
pub mod chart;
pub mod trade;

// Re-export commonly used types for convenience
pub use candle::{Candle, CandleTable, CANDLE_COLUMNS};
pub use chart::{Annotation, CandleMatch, ChartSpec, PlotWindow, PricePoint, TradeSide};
pub use trade::{TradeEvent, TradeId, TrailingSellPoint};
