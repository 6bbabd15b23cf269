//! Deterministic placeholder analysis values.
//!
//! The trial never reads uploaded bytes; every accepted file is reported
//! with the same size, row count, and detected-column list. The reported
//! column count intentionally exceeds the number of listed names so the
//! analysis panel can show a "+N more" badge.

use shared::domain::FileMetadata;

pub const SAMPLE_SIZE_LABEL: &str = "2.3 MB";
pub const SAMPLE_ROW_COUNT: u64 = 15_420;
pub const SAMPLE_COLUMN_COUNT: u32 = 12;
pub const SAMPLE_COLUMNS: [&str; 10] = [
    "Customer_ID",
    "Product_Name",
    "Sales_Amount",
    "Date",
    "Region",
    "Category",
    "Quantity",
    "Discount",
    "Profit",
    "Customer_Segment",
];

/// Strips any path prefix from an upload identifier.
pub fn display_name(raw: &str) -> &str {
    raw.rsplit('/').next().unwrap_or(raw)
}

pub fn analysis_for(file_name: &str) -> FileMetadata {
    FileMetadata {
        file_name: file_name.to_string(),
        size_label: SAMPLE_SIZE_LABEL.to_string(),
        row_count: SAMPLE_ROW_COUNT,
        column_count: SAMPLE_COLUMN_COUNT,
        column_names: SAMPLE_COLUMNS.iter().map(|name| name.to_string()).collect(),
    }
}
