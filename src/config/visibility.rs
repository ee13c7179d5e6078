//! Which record fields each category shows.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::config::columns::ColumnDef;
use crate::domain::Category;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("visibility rules have no entry for category '{}'", .0.key())]
    MissingCategory(Category),

    #[error("visibility rule for '{}' names unknown column '{field}'", .category.key())]
    UnknownField { category: Category, field: String },

    #[error("failed to read visibility rules: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse visibility rules: {0}")]
    Parse(#[from] serde_json::Error),
}

const SHARED_FIELDS: &[&str] = &["ticker", "date", "macd", "mfi"];

/// Default rule table, one entry per category on top of `SHARED_FIELDS`.
pub const DEFAULT_VISIBILITY_RULES: &[(Category, &[&str])] = &[
    (
        Category::ByOneDayAvgMf,
        &["one_day_avg_mf", "one_day_close_change", "ema3", "ema9", "ema_3over9"],
    ),
    (
        Category::ByThreeDayAvgMf,
        &[
            "three_day_avg_mf",
            "three_day_avg_close_change",
            "closingPriceChangeDay12",
            "closingPriceChangeDay23",
            "ema12",
            "ema26",
            "ema_12over26",
        ],
    ),
    (
        Category::ByFivePrecOpenCloseChange,
        &[
            "one_day_open_close_change",
            "one_day_close_change",
            "ema12",
            "ema9",
            "ema_12over9",
        ],
    ),
    (
        Category::ByVolume,
        &["volume", "one_day_volume_change", "ema20", "ema50", "ema_50over20"],
    ),
    (
        Category::ByThreeDayAvgVolume,
        &[
            "three_day_avg_volume",
            "three_day_avg_volume_change",
            "volume",
            "ema20",
            "ema50",
        ],
    ),
];

/// Category -> visible field names. Loaded once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibilityRules {
    rules: BTreeMap<Category, BTreeSet<String>>,
}

impl Default for VisibilityRules {
    fn default() -> Self {
        let rules = DEFAULT_VISIBILITY_RULES
            .iter()
            .map(|(category, fields)| {
                let visible = SHARED_FIELDS
                    .iter()
                    .chain(fields.iter())
                    .map(|f| f.to_string())
                    .collect();
                (*category, visible)
            })
            .collect();
        Self { rules }
    }
}

impl VisibilityRules {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn visible_fields(&self, category: Category) -> Result<&BTreeSet<String>, ConfigError> {
        self.rules
            .get(&category)
            .ok_or(ConfigError::MissingCategory(category))
    }

    /// Every category must have an entry, and every entry may only name
    /// columns that exist.
    pub fn validate(&self, columns: &[ColumnDef]) -> Result<(), ConfigError> {
        for category in Category::iter() {
            let fields = self.visible_fields(category)?;
            if let Some(unknown) = fields
                .iter()
                .find(|field| !columns.iter().any(|c| c.field == field.as_str()))
            {
                return Err(ConfigError::UnknownField {
                    category,
                    field: unknown.clone(),
                });
            }
        }
        Ok(())
    }
}
