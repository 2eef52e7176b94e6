//! Annotated price charts around recorded trades
//!
//! Loads a Binance kline dump and the trade events exported by the trading
//! bot, then writes one PNG per trade showing the close price around the
//! buy and sell candles.

pub mod config;
pub mod dataset;
pub mod models;
pub mod services;
pub mod utils;
