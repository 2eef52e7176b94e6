use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::info;

use crate::models::TradeEvent;
use crate::utils::errors::PlotError;

/// Load the bot's trade event list, keeping file order
pub fn load_trade_events<P: AsRef<Path>>(path: P) -> Result<Vec<TradeEvent>, PlotError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| PlotError::io(path, e))?;

    // The bot writes `null` when no trade was recorded
    let events: Option<Vec<TradeEvent>> = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| PlotError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;
    let events = events.unwrap_or_default();

    info!("Loaded {} trade events from {}", events.len(), path.display());
    Ok(events)
}
