use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single indicator value as it arrives on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndicatorValue {
    Number(f64),
    Text(String),
    /// EMA crossover event markers
    Markers(Vec<String>),
}

/// Analytics for one ticker on one date.
///
/// The enumerated indicators are typed fields. Anything else the service sends
/// lands in `extra` so newer payloads still decode. A `null` extension value
/// is kept as `None` and renders as a missing cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TickerRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub ticker: String,
    /// Epoch milliseconds
    pub date: i64,
    pub macd: f64,
    pub one_day_avg_mf: f64,
    pub three_day_avg_mf: f64,
    pub one_day_open_close_change: f64,
    pub volume: f64,
    pub three_day_avg_volume: f64,
    pub one_day_volume_change: f64,
    pub three_day_avg_volume_change: f64,
    pub one_day_close_change: f64,
    pub three_day_avg_close_change: f64,
    #[serde(default)]
    pub ema_3over9: Vec<String>,
    #[serde(default)]
    pub ema_12over9: Vec<String>,
    #[serde(default)]
    pub ema_12over26: Vec<String>,
    #[serde(default)]
    pub ema_50over20: Vec<String>,
    #[serde(rename = "closingPriceChangeDay12")]
    pub closing_price_change_day12: f64,
    #[serde(rename = "closingPriceChangeDay23")]
    pub closing_price_change_day23: f64,
    pub mfi: f64,
    pub ema3: f64,
    pub ema9: f64,
    pub ema12: f64,
    pub ema20: f64,
    pub ema26: f64,
    pub ema50: f64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Option<IndicatorValue>>,
}

impl TickerRecord {
    /// Wire names of every typed field, in declaration order.
    pub const FIELDS: &'static [&'static str] = &[
        "id",
        "ticker",
        "date",
        "macd",
        "one_day_avg_mf",
        "three_day_avg_mf",
        "one_day_open_close_change",
        "volume",
        "three_day_avg_volume",
        "one_day_volume_change",
        "three_day_avg_volume_change",
        "one_day_close_change",
        "three_day_avg_close_change",
        "ema_3over9",
        "ema_12over9",
        "ema_12over26",
        "ema_50over20",
        "closingPriceChangeDay12",
        "closingPriceChangeDay23",
        "mfi",
        "ema3",
        "ema9",
        "ema12",
        "ema20",
        "ema26",
        "ema50",
    ];

    /// Looks a value up by its wire name, falling back to the extension map.
    pub fn field(&self, name: &str) -> Option<IndicatorValue> {
        use IndicatorValue::{Markers, Number, Text};

        let value = match name {
            "id" => Number(self.id? as f64),
            "ticker" => Text(self.ticker.clone()),
            "date" => Number(self.date as f64),
            "macd" => Number(self.macd),
            "one_day_avg_mf" => Number(self.one_day_avg_mf),
            "three_day_avg_mf" => Number(self.three_day_avg_mf),
            "one_day_open_close_change" => Number(self.one_day_open_close_change),
            "volume" => Number(self.volume),
            "three_day_avg_volume" => Number(self.three_day_avg_volume),
            "one_day_volume_change" => Number(self.one_day_volume_change),
            "three_day_avg_volume_change" => Number(self.three_day_avg_volume_change),
            "one_day_close_change" => Number(self.one_day_close_change),
            "three_day_avg_close_change" => Number(self.three_day_avg_close_change),
            "ema_3over9" => Markers(self.ema_3over9.clone()),
            "ema_12over9" => Markers(self.ema_12over9.clone()),
            "ema_12over26" => Markers(self.ema_12over26.clone()),
            "ema_50over20" => Markers(self.ema_50over20.clone()),
            "closingPriceChangeDay12" => Number(self.closing_price_change_day12),
            "closingPriceChangeDay23" => Number(self.closing_price_change_day23),
            "mfi" => Number(self.mfi),
            "ema3" => Number(self.ema3),
            "ema9" => Number(self.ema9),
            "ema12" => Number(self.ema12),
            "ema20" => Number(self.ema20),
            "ema26" => Number(self.ema26),
            "ema50" => Number(self.ema50),
            other => return self.extra.get(other).cloned().flatten(),
        };
        Some(value)
    }

    /// True when the record describes `ticker`, ignoring case.
    pub fn is_ticker(&self, ticker: &str) -> bool {
        self.ticker.eq_ignore_ascii_case(ticker)
    }
}
