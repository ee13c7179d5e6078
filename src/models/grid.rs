use itertools::Itertools;

use crate::config::{CellFormat, ColumnDef};
use crate::domain::Category;
use crate::models::{DatasetByCategory, IndicatorValue, TickerRecord};
use crate::utils::time_utils::epoch_ms_to_utc;

const MISSING_CELL: &str = "-";

/// One table row: 1-based id plus a formatted cell per visible column.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub id: usize,
    pub cells: Vec<String>,
}

/// Reshapes the records of `category` into table rows, keeping record order.
pub fn rows_for(
    dataset: &DatasetByCategory,
    category: Category,
    columns: &[ColumnDef],
) -> Vec<GridRow> {
    dataset
        .records(category)
        .iter()
        .enumerate()
        .map(|(idx, record)| GridRow {
            id: idx + 1,
            cells: columns
                .iter()
                .filter(|c| !c.hidden)
                .map(|c| format_cell(record, c))
                .collect(),
        })
        .collect()
}

pub fn format_cell(record: &TickerRecord, column: &ColumnDef) -> String {
    match record.field(column.field) {
        Some(value) => format_value(&value, column.format),
        None => MISSING_CELL.to_string(),
    }
}

pub fn format_value(value: &IndicatorValue, format: CellFormat) -> String {
    match (value, format) {
        (IndicatorValue::Number(n), _) if !n.is_finite() => MISSING_CELL.to_string(),
        (IndicatorValue::Number(n), CellFormat::Date) => {
            epoch_ms_to_utc(*n as i64).unwrap_or_else(|| MISSING_CELL.to_string())
        }
        (IndicatorValue::Number(n), CellFormat::Integer) => group_thousands(n.round() as i64),
        (IndicatorValue::Number(n), CellFormat::Decimal(places)) => format!("{:.*}", places, n),
        (IndicatorValue::Number(n), CellFormat::Percent) => format!("{:.2}%", n),
        (IndicatorValue::Number(n), _) => n.to_string(),
        (IndicatorValue::Text(s), _) => s.clone(),
        (IndicatorValue::Markers(m), _) if m.is_empty() => MISSING_CELL.to_string(),
        (IndicatorValue::Markers(m), _) => m.iter().join(", "),
    }
}

/// `1234567` -> `1,234,567`
fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let grouped = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .join(",");
    if n < 0 { format!("-{}", grouped) } else { grouped }
}
