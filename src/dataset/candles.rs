use std::path::Path;
use std::str::FromStr;

use csv::StringRecord;
use tracing::{debug, info, warn};

use crate::models::{Candle, CandleTable, CANDLE_COLUMNS};
use crate::utils::errors::PlotError;
use crate::utils::time::from_epoch_millis;

const OPEN_TIME: usize = 0;
const OPEN_PRICE: usize = 1;
const HIGH_PRICE: usize = 2;
const LOW_PRICE: usize = 3;
const CLOSE_PRICE: usize = 4;
const VOLUME: usize = 5;
const CLOSE_TIME: usize = 6;
const QUOTE_ASSET_VOLUME: usize = 7;
const NUMBER_OF_TRADES: usize = 8;
const TAKER_BUY_BASE_ASSET_VOLUME: usize = 9;
const TAKER_BUY_QUOTE_ASSET_VOLUME: usize = 10;
const IGNORE: usize = 11;

/// Load a headerless Binance kline CSV
///
/// Columns are mapped by position. A row of the wrong width or with an
/// unparseable field fails the whole load.
pub fn load_candles<P: AsRef<Path>>(path: P) -> Result<CandleTable, PlotError> {
    let path = path.as_ref();
    debug!("Reading candles from {}", path.display());

    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| PlotError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;

    let table = read_candles(reader, path)?;
    if table.is_empty() {
        warn!("No candles in {}, every trade will be skipped", path.display());
    }
    info!("Loaded {} candles from {}", table.len(), path.display());
    Ok(table)
}

fn read_candles<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    path: &Path,
) -> Result<CandleTable, PlotError> {
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| PlotError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
        rows.push(parse_candle(&record)?);
    }
    Ok(CandleTable::new(rows))
}

fn parse_candle(record: &StringRecord) -> Result<Candle, PlotError> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);

    if record.len() != CANDLE_COLUMNS {
        return Err(PlotError::RowWidth {
            line,
            found: record.len(),
            expected: CANDLE_COLUMNS,
        });
    }

    let close_millis: i64 = parse_field(record, CLOSE_TIME, "close time", line)?;
    let close_time = from_epoch_millis(close_millis).ok_or_else(|| PlotError::Field {
        line,
        message: format!("close time {} is out of range", close_millis),
    })?;

    Ok(Candle {
        open_time: parse_field(record, OPEN_TIME, "open time", line)?,
        open_price: parse_field(record, OPEN_PRICE, "open price", line)?,
        high_price: parse_field(record, HIGH_PRICE, "high price", line)?,
        low_price: parse_field(record, LOW_PRICE, "low price", line)?,
        close_price: parse_field(record, CLOSE_PRICE, "close price", line)?,
        volume: parse_field(record, VOLUME, "volume", line)?,
        close_time,
        quote_asset_volume: parse_field(record, QUOTE_ASSET_VOLUME, "quote asset volume", line)?,
        number_of_trades: parse_field(record, NUMBER_OF_TRADES, "number of trades", line)?,
        taker_buy_base_asset_volume: parse_field(
            record,
            TAKER_BUY_BASE_ASSET_VOLUME,
            "taker buy base asset volume",
            line,
        )?,
        taker_buy_quote_asset_volume: parse_field(
            record,
            TAKER_BUY_QUOTE_ASSET_VOLUME,
            "taker buy quote asset volume",
            line,
        )?,
        ignore: parse_flag(record, IGNORE, line)?,
    })
}

fn parse_field<T>(record: &StringRecord, index: usize, name: &str, line: u64) -> Result<T, PlotError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = record.get(index).unwrap_or("");
    raw.parse::<T>().map_err(|e| PlotError::Field {
        line,
        message: format!("invalid {} '{}': {}", name, raw, e),
    })
}

/// Binance writes the ignore column as a number; any non-zero value is true
fn parse_flag(record: &StringRecord, index: usize, line: u64) -> Result<bool, PlotError> {
    let raw = record.get(index).unwrap_or("");
    match raw.to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => other
            .parse::<f64>()
            .map(|v| v != 0.0)
            .map_err(|_| PlotError::Field {
                line,
                message: format!("invalid ignore flag '{}'", raw),
            }),
    }
}
