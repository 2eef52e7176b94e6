use chrono::{DateTime, Utc};

use crate::models::{CandleMatch, CandleTable};
use crate::utils::errors::PlotError;
use crate::utils::time::close_time_for_event;

/// First candle whose close time equals `close_time` exactly
pub fn find_by_close_time(candles: &CandleTable, close_time: DateTime<Utc>) -> Option<CandleMatch> {
    let index = candles.rows().iter().position(|c| c.close_time == close_time)?;
    candles.get(index).map(|candle| CandleMatch {
        index,
        close_time: candle.close_time,
        close_price: candle.close_price,
    })
}

/// Match an event timestamp (`YYYY-MM-DD HH:MM:SS`) to the candle closing in that second
pub fn match_event_time(candles: &CandleTable, event_time: &str) -> Result<Option<CandleMatch>, PlotError> {
    let close_time = close_time_for_event(event_time)?;
    Ok(find_by_close_time(candles, close_time))
}
