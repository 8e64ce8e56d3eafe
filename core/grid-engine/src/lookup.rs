//! FILENAME: core/grid-engine/src/lookup.rs
//! Cell lookups by item, and lookup formulas built from a grid's header bands.
//!
//! Items are located with `AxisItems::index_of`: equality first, then equal
//! converted labels when the axis has a converter.

use cell_engine::{Cell, Offset};

use crate::definition::{Axis, AxisItem};
use crate::engine::Grid;
use crate::error::{AxisKind, GridError, Result};

/// What to search for in a header band: an axis item or a literal label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LookupLabel<'a, I> {
    Item(&'a I),
    Text(&'a str),
}

fn resolve_label<I: AxisItem>(axis: &Axis<I>, key: LookupLabel<'_, I>, kind: AxisKind) -> Result<String> {
    let label = match key {
        LookupLabel::Text(text) => text.to_string(),
        LookupLabel::Item(item) => {
            let items = axis.declared().ok_or(GridError::ItemNotFound(kind))?;
            let index = items.index_of(item).ok_or(GridError::ItemNotFound(kind))?;
            items.label_of(item, index).display()
        }
    };

    if label.is_empty() {
        return Err(GridError::EmptyLabel(kind));
    }
    Ok(label)
}

/// Quotes a label as a formula string literal.
pub(crate) fn string_literal(label: &str) -> String {
    format!("\"{}\"", label.replace('"', "\"\""))
}

impl<A, C: AxisItem, R: AxisItem> Grid<A, C, R> {
    fn column_index_of(&self, column: &C) -> Option<u32> {
        self.column.declared()?.index_of(column).map(|i| i as u32)
    }

    fn row_index_of(&self, row: &R) -> Option<u32> {
        self.row.declared()?.index_of(row).map(|i| i as u32)
    }

    /// Header cell of a column item; None without a column header.
    pub fn find_column_header_cell(&self, column: &C) -> Option<Cell> {
        if !self.shows_column_header() {
            return None;
        }
        let index = self.column_index_of(column)?;
        let right = u32::from(self.shows_row_header()) + index;
        Some(self.origin().relative(Offset::right(right)))
    }

    /// Totals-row cell of a column item; None without column totals.
    pub fn find_column_total_header_cell(&self, column: &C) -> Option<Cell> {
        let index = self.column_index_of(column)?;
        Some(self.column_total_header_origin()?.relative(Offset::right(index)))
    }

    /// Header cell of a row item; None without a row header.
    pub fn find_row_header_cell(&self, row: &R) -> Option<Cell> {
        if !self.shows_row_header() {
            return None;
        }
        let index = self.row_index_of(row)?;
        let bottom = self.header_row_count() + index;
        Some(self.origin().relative(Offset::bottom(bottom)))
    }

    /// Totals-column cell of a row item; None without row totals.
    pub fn find_row_total_cell(&self, row: &R) -> Option<Cell> {
        let index = self.row_index_of(row)?;
        Some(self.row_total_origin()?.relative(Offset::bottom(index)))
    }

    /// Data cell for the given items.
    ///
    /// A key must be passed for exactly the axes that declare items. Returns
    /// `Ok(None)` when a key is not among the items.
    pub fn find_data_cell(&self, column: Option<&C>, row: Option<&R>) -> Result<Option<Cell>> {
        let origin = self.data_origin();

        match (self.column.declared(), self.row.declared()) {
            (None, None) => {
                if column.is_some() || row.is_some() {
                    return Err(GridError::LookupKeys("no items are declared: pass neither column nor row"));
                }
                Ok(Some(origin))
            }
            (None, Some(rows)) => {
                if column.is_some() {
                    return Err(GridError::LookupKeys("column items are not declared: do not pass column"));
                }
                let row = row.ok_or(GridError::LookupKeys("row items are declared: pass row"))?;
                Ok(rows
                    .index_of(row)
                    .map(|i| origin.relative(Offset::bottom(i as u32))))
            }
            (Some(columns), None) => {
                if row.is_some() {
                    return Err(GridError::LookupKeys("row items are not declared: do not pass row"));
                }
                let column = column.ok_or(GridError::LookupKeys("column items are declared: pass column"))?;
                Ok(columns
                    .index_of(column)
                    .map(|i| origin.relative(Offset::right(i as u32))))
            }
            (Some(columns), Some(rows)) => {
                let (Some(column), Some(row)) = (column, row) else {
                    return Err(GridError::LookupKeys("both axes declare items: pass both column and row"));
                };
                Ok(columns
                    .index_of(column)
                    .zip(rows.index_of(row))
                    .map(|(ci, ri)| origin.relative(Offset::new(ci as u32, ri as u32))))
            }
        }
    }

    /// `XLOOKUP` finding `row` in the row header and returning the matching
    /// cell of `column`'s full-height column.
    pub fn generate_xlookup_for_row_func(&self, column: &C, row: LookupLabel<'_, R>) -> Result<String> {
        if !self.shows_column_header() || !self.shows_row_header() {
            return Err(GridError::HeadersRequired);
        }

        let label = resolve_label(&self.row, row, AxisKind::Row)?;
        let lookup_range = self.row_header_range().ok_or(GridError::HeadersRequired)?;
        let header_cell = self
            .find_column_header_cell(column)
            .ok_or(GridError::ItemNotFound(AxisKind::Column))?;
        let return_range = header_cell.to_range(Offset::bottom(self.row_length().saturating_sub(1)));

        Ok(format!("XLOOKUP({}, {}, {})", string_literal(&label), lookup_range, return_range))
    }

    /// `XLOOKUP` finding `column` in the column header and returning the
    /// matching cell of `row`'s full-width row.
    pub fn generate_xlookup_for_column_func(&self, column: LookupLabel<'_, C>, row: &R) -> Result<String> {
        if !self.shows_column_header() || !self.shows_row_header() {
            return Err(GridError::HeadersRequired);
        }

        let label = resolve_label(&self.column, column, AxisKind::Column)?;
        let lookup_range = self.column_header_range().ok_or(GridError::HeadersRequired)?;
        let header_cell = self
            .find_row_header_cell(row)
            .ok_or(GridError::ItemNotFound(AxisKind::Row))?;
        let return_range = header_cell.to_range(Offset::right(self.column_length().saturating_sub(1)));

        Ok(format!("XLOOKUP({}, {}, {})", string_literal(&label), lookup_range, return_range))
    }
}
