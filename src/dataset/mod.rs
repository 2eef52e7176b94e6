pub mod candles;
pub mod trades;

pub use candles::load_candles;
pub use trades::load_trade_events;

use crate::config::PlotConfig;
use crate::models::{CandleTable, TradeEvent};
use crate::utils::errors::PlotError;

/// Read-only inputs shared by every trade event of a run
#[derive(Debug)]
pub struct Dataset {
    pub candles: CandleTable,
    pub events: Vec<TradeEvent>,
}

/// Load the trade events and the candle table named by `config`
pub fn load_dataset(config: &PlotConfig) -> Result<Dataset, PlotError> {
    let events = load_trade_events(&config.data_file)?;
    let candles = load_candles(config.dataset_file())?;
    Ok(Dataset { candles, events })
}
