//! Trade event models, as exported by the trading bot

use std::fmt;

use serde::Deserialize;

/// Identifier of the buy order; the bot writes integers but strings are accepted
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TradeId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeId::Number(n) => write!(f, "{}", n),
            TradeId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Stop price of a trailing sell at a point in time
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailingSellPoint {
    pub time: String,
    pub stop_price: f64,
}

/// A completed buy/sell pair
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeEvent {
    pub buy_id: TradeId,
    pub buy_time: String,
    pub sell_time: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub trailing_sell: Vec<TrailingSellPoint>,
}

/// Go marshals an unset slice as `null`
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<TrailingSellPoint>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<TrailingSellPoint>>::deserialize(deserializer)?.unwrap_or_default())
}
