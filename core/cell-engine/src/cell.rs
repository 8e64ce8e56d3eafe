//! FILENAME: core/cell-engine/src/cell.rs
//! PURPOSE: The absolute cell coordinate and its notation/range algebra.
//! CONTEXT: A `Cell` is an immutable (sheet, column, row) value. Every formula
//! and range string a grid emits is produced here, so the column-letter scheme,
//! sheet quoting and `:` joining live in one place.

use serde::{Deserialize, Serialize};

use crate::coord::{escape_sheet_name, index_to_col, parse_a1, row_number};
use crate::value::{CellData, CellValue};

/// A displacement towards the right and bottom of the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Offset {
    #[serde(default)]
    pub right: u32,
    #[serde(default)]
    pub bottom: u32,
}

impl Offset {
    pub const fn new(right: u32, bottom: u32) -> Self {
        Offset { right, bottom }
    }

    pub const fn right(right: u32) -> Self {
        Offset { right, bottom: 0 }
    }

    pub const fn bottom(bottom: u32) -> Self {
        Offset { right: 0, bottom }
    }
}

/// Sheet edges a range can be stretched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeEnd {
    /// Column A of the same row: "A2:B2".
    LeftEnd,
    /// The rest of the row, open-ended: "B2:2".
    RightEnd,
    /// Row 1 of the same column: "B1:B2".
    TopEnd,
    /// The rest of the column, open-ended: "B2:B".
    BottomEnd,
}

/// The far side of a range started at some cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeTarget<'a> {
    /// No far side: the range is the cell itself.
    Itself,
    Cell(&'a Cell),
    Offset(Offset),
    End(RangeEnd),
}

impl<'a> From<&'a Cell> for RangeTarget<'a> {
    fn from(cell: &'a Cell) -> Self {
        RangeTarget::Cell(cell)
    }
}

impl From<Offset> for RangeTarget<'_> {
    fn from(offset: Offset) -> Self {
        RangeTarget::Offset(offset)
    }
}

impl From<RangeEnd> for RangeTarget<'_> {
    fn from(end: RangeEnd) -> Self {
        RangeTarget::End(end)
    }
}

impl From<()> for RangeTarget<'_> {
    fn from(_: ()) -> Self {
        RangeTarget::Itself
    }
}

/// An absolute cell position. Column and row are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub sheet: Option<String>,
    pub column: u32,
    pub row: u32,
}

impl Cell {
    /// Creates a cell without a sheet.
    pub fn new(column: u32, row: u32) -> Self {
        Cell {
            sheet: None,
            column,
            row,
        }
    }

    /// Creates a cell on the given sheet.
    pub fn on_sheet(sheet: impl Into<String>, column: u32, row: u32) -> Self {
        Cell {
            sheet: Some(sheet.into()),
            column,
            row,
        }
    }

    /// Parses a local A1 reference such as "C7".
    pub fn parse(reference: &str) -> Option<Self> {
        parse_a1(reference).map(|(column, row)| Cell::new(column, row))
    }

    /// Encodes a scalar into the output cell payload.
    pub fn data(value: impl Into<CellValue>) -> CellData {
        CellData::from_value(&value.into())
    }

    pub fn column_name(&self) -> String {
        index_to_col(self.column)
    }

    pub fn row_number(&self) -> u32 {
        row_number(self.row)
    }

    /// "B2", or "'Sheet 1'!B2" when a sheet is set.
    pub fn notation(&self) -> String {
        match self.sheet.as_deref() {
            Some(sheet) if !sheet.is_empty() => {
                format!("{}!{}", escape_sheet_name(sheet), self.local_notation())
            }
            _ => self.local_notation(),
        }
    }

    /// Notation without the sheet prefix.
    pub fn local_notation(&self) -> String {
        format!("{}{}", self.column_name(), self.row_number())
    }

    /// Returns a new cell moved right/down by the offset, on the same sheet.
    pub fn relative(&self, offset: Offset) -> Cell {
        Cell {
            sheet: self.sheet.clone(),
            column: self.column + offset.right,
            row: self.row + offset.bottom,
        }
    }

    /// Range notation from this cell to the target, sheet-prefixed when a
    /// sheet is set. The second operand never repeats the sheet.
    ///
    /// ```
    /// use cell_engine::{Cell, Offset, RangeEnd};
    ///
    /// let cell = Cell::new(1, 1);
    /// assert_eq!(cell.to_range(()), "B2");
    /// assert_eq!(cell.to_range(&Cell::new(2, 2)), "B2:C3");
    /// assert_eq!(cell.to_range(Offset::right(1)), "B2:C2");
    /// assert_eq!(cell.to_range(RangeEnd::BottomEnd), "B2:B");
    /// ```
    pub fn to_range<'a>(&self, target: impl Into<RangeTarget<'a>>) -> String {
        self.range_notation(target.into(), false)
    }

    /// Same as [`Cell::to_range`] but never prefixed with the sheet, for use
    /// inside formulas already scoped to a sheet.
    pub fn to_local_range<'a>(&self, target: impl Into<RangeTarget<'a>>) -> String {
        self.range_notation(target.into(), true)
    }

    fn range_notation(&self, target: RangeTarget<'_>, local: bool) -> String {
        let start = if local { self.local_notation() } else { self.notation() };

        match target {
            RangeTarget::Itself => start,
            RangeTarget::Cell(other) => format!("{}:{}", start, other.local_notation()),
            RangeTarget::Offset(offset) => {
                format!("{}:{}", start, self.relative(offset).local_notation())
            }
            RangeTarget::End(RangeEnd::LeftEnd) => {
                let row_start = Cell {
                    sheet: self.sheet.clone(),
                    column: 0,
                    row: self.row,
                };
                row_start.range_notation(RangeTarget::Cell(self), local)
            }
            RangeTarget::End(RangeEnd::RightEnd) => format!("{}:{}", start, self.row_number()),
            RangeTarget::End(RangeEnd::TopEnd) => {
                let column_start = Cell {
                    sheet: self.sheet.clone(),
                    column: self.column,
                    row: 0,
                };
                column_start.range_notation(RangeTarget::Cell(self), local)
            }
            RangeTarget::End(RangeEnd::BottomEnd) => format!("{}:{}", start, self.column_name()),
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.notation())
    }
}
