//! FILENAME: core/cell-engine/src/lib.rs
//! PURPOSE: Main library entry point for cell addressing.
//! CONTEXT: Re-exports the coordinate helpers, the `Cell` value object and the
//! cell payload encoding used by `grid-engine`.

pub mod cell;
pub mod coord;
pub mod value;

// Re-export commonly used types at the crate root
pub use cell::{Cell, Offset, RangeEnd, RangeTarget};
pub use coord::{col_to_index, escape_sheet_name, index_to_col, parse_a1, row_number};
pub use value::{CellData, CellFormat, CellValue, ExtendedValue};
