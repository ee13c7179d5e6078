use serde::{Deserialize, Serialize};

use crate::domain::Category;
use crate::models::TickerRecord;

/// One ordered record sequence per category.
///
/// Every category is a named field, so a payload that misses one or carries an
/// unknown key fails to decode instead of silently rendering an empty tab.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetByCategory {
    pub by_one_day_avg_mf: Vec<TickerRecord>,
    pub by_three_day_avg_mf: Vec<TickerRecord>,
    pub by_five_prec_open_close_change: Vec<TickerRecord>,
    pub by_volume: Vec<TickerRecord>,
    pub by_three_day_avg_volume: Vec<TickerRecord>,
}

impl DatasetByCategory {
    /// A dataset where every category holds the same single record.
    pub fn single(record: TickerRecord) -> Self {
        Self {
            by_one_day_avg_mf: vec![record.clone()],
            by_three_day_avg_mf: vec![record.clone()],
            by_five_prec_open_close_change: vec![record.clone()],
            by_volume: vec![record.clone()],
            by_three_day_avg_volume: vec![record],
        }
    }

    pub fn records(&self, category: Category) -> &[TickerRecord] {
        match category {
            Category::ByOneDayAvgMf => &self.by_one_day_avg_mf,
            Category::ByThreeDayAvgMf => &self.by_three_day_avg_mf,
            Category::ByFivePrecOpenCloseChange => &self.by_five_prec_open_close_change,
            Category::ByVolume => &self.by_volume,
            Category::ByThreeDayAvgVolume => &self.by_three_day_avg_volume,
        }
    }

    /// First record for `ticker` in any category.
    pub fn find_ticker(&self, ticker: &str) -> Option<&TickerRecord> {
        use strum::IntoEnumIterator;

        Category::iter()
            .flat_map(|category| self.records(category))
            .find(|record| record.is_ticker(ticker))
    }

    pub fn total_records(&self) -> usize {
        use strum::IntoEnumIterator;

        Category::iter().map(|c| self.records(c).len()).sum()
    }
}
