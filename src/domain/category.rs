use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed analytical rankings a dataset is split into.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Debug,
    Serialize,
    Deserialize,
    strum_macros::EnumIter,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    #[default]
    ByOneDayAvgMf,
    ByThreeDayAvgMf,
    ByFivePrecOpenCloseChange,
    ByVolume,
    ByThreeDayAvgVolume,
}

impl Category {
    /// Wire key, e.g. `by_volume`.
    pub fn key(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Category::ByOneDayAvgMf => write!(f, "1-Day Avg Money Flow"),
            Category::ByThreeDayAvgMf => write!(f, "3-Day Avg Money Flow"),
            Category::ByFivePrecOpenCloseChange => write!(f, "5% Open/Close Change"),
            Category::ByVolume => write!(f, "Volume"),
            Category::ByThreeDayAvgVolume => write!(f, "3-Day Avg Volume"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn keys_match_wire_names() {
        let keys: Vec<&str> = Category::iter().map(Category::key).collect();
        assert_eq!(
            keys,
            vec![
                "by_one_day_avg_mf",
                "by_three_day_avg_mf",
                "by_five_prec_open_close_change",
                "by_volume",
                "by_three_day_avg_volume",
            ]
        );
    }

    #[test]
    fn serde_and_strum_agree() {
        for category in Category::iter() {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.key()));
            assert_eq!(Category::from_str(category.key()).unwrap(), category);
        }
        assert!(Category::from_str("by_market_cap").is_err());
    }
}
