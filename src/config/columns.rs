//! Table column definitions

/// How a cell value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormat {
    Text,
    /// Epoch milliseconds shown as a UTC calendar date
    Date,
    /// Whole numbers with thousands separators
    Integer,
    Decimal(usize),
    Percent,
    Markers,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// Wire name of the `TickerRecord` field
    pub field: &'static str,
    pub header: &'static str,
    pub width: f32,
    pub format: CellFormat,
    pub hidden: bool,
}

impl ColumnDef {
    const fn new(field: &'static str, header: &'static str, width: f32, format: CellFormat) -> Self {
        Self {
            field,
            header,
            width,
            format,
            hidden: false,
        }
    }
}

pub const COLUMN_DEFINITIONS: &[ColumnDef] = &[
    ColumnDef::new("ticker", "Ticker", 70.0, CellFormat::Text),
    ColumnDef::new("date", "Date", 90.0, CellFormat::Date),
    ColumnDef::new("volume", "Volume", 110.0, CellFormat::Integer),
    ColumnDef::new("three_day_avg_volume", "3D Avg Volume", 120.0, CellFormat::Integer),
    ColumnDef::new("one_day_volume_change", "1D Volume Chg", 110.0, CellFormat::Percent),
    ColumnDef::new("three_day_avg_volume_change", "3D Avg Volume Chg", 130.0, CellFormat::Percent),
    ColumnDef::new("one_day_avg_mf", "1D Avg MF", 110.0, CellFormat::Decimal(2)),
    ColumnDef::new("three_day_avg_mf", "3D Avg MF", 110.0, CellFormat::Decimal(2)),
    ColumnDef::new("one_day_open_close_change", "1D Open/Close Chg", 130.0, CellFormat::Percent),
    ColumnDef::new("one_day_close_change", "1D Close Chg", 100.0, CellFormat::Percent),
    ColumnDef::new("three_day_avg_close_change", "3D Avg Close Chg", 120.0, CellFormat::Percent),
    ColumnDef::new("closingPriceChangeDay12", "Close Chg D1-D2", 110.0, CellFormat::Percent),
    ColumnDef::new("closingPriceChangeDay23", "Close Chg D2-D3", 110.0, CellFormat::Percent),
    ColumnDef::new("macd", "MACD", 80.0, CellFormat::Decimal(3)),
    ColumnDef::new("mfi", "MFI", 70.0, CellFormat::Decimal(1)),
    ColumnDef::new("ema3", "EMA 3", 80.0, CellFormat::Decimal(2)),
    ColumnDef::new("ema9", "EMA 9", 80.0, CellFormat::Decimal(2)),
    ColumnDef::new("ema12", "EMA 12", 80.0, CellFormat::Decimal(2)),
    ColumnDef::new("ema20", "EMA 20", 80.0, CellFormat::Decimal(2)),
    ColumnDef::new("ema26", "EMA 26", 80.0, CellFormat::Decimal(2)),
    ColumnDef::new("ema50", "EMA 50", 80.0, CellFormat::Decimal(2)),
    ColumnDef::new("ema_3over9", "EMA 3/9 Cross", 140.0, CellFormat::Markers),
    ColumnDef::new("ema_12over9", "EMA 12/9 Cross", 140.0, CellFormat::Markers),
    ColumnDef::new("ema_12over26", "EMA 12/26 Cross", 140.0, CellFormat::Markers),
    ColumnDef::new("ema_50over20", "EMA 50/20 Cross", 140.0, CellFormat::Markers),
];

pub fn column_definitions() -> Vec<ColumnDef> {
    COLUMN_DEFINITIONS.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TickerRecord;
    use std::collections::HashSet;

    #[test]
    fn every_column_maps_to_a_record_field() {
        for column in COLUMN_DEFINITIONS {
            assert!(
                TickerRecord::FIELDS.contains(&column.field),
                "{} is not a TickerRecord field",
                column.field
            );
        }
    }

    #[test]
    fn fields_are_unique() {
        let unique: HashSet<_> = COLUMN_DEFINITIONS.iter().map(|c| c.field).collect();
        assert_eq!(unique.len(), COLUMN_DEFINITIONS.len());
    }
}
