//! FILENAME: core/grid-engine/src/view.rs
//! Grid View - The payload handed to the spreadsheet API.
//!
//! These types mirror the API's grid-data schema closely enough to be
//! serialized straight to its JSON. Nothing in this module interprets cell
//! formats or values; the engine fills them in.

use serde::{Deserialize, Serialize};

pub use cell_engine::CellData;

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RowData {
    pub values: Vec<CellData>,
}

/// Per-column sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixel_size: Option<u32>,
}

impl DimensionProperties {
    pub fn sized(pixel_size: Option<u32>) -> Self {
        DimensionProperties { pixel_size }
    }
}

/// A block of cells anchored at (start_column, start_row).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridData {
    pub start_column: u32,
    pub start_row: u32,
    pub row_data: Vec<RowData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_metadata: Option<Vec<DimensionProperties>>,
}

/// Half-open index range covered by a grid (end indices are exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    pub start_row_index: u32,
    pub end_row_index: u32,
    pub start_column_index: u32,
    pub end_column_index: u32,
}

impl GridRange {
    pub fn row_count(&self) -> u32 {
        self.end_row_index - self.start_row_index
    }

    pub fn column_count(&self) -> u32 {
        self.end_column_index - self.start_column_index
    }
}
