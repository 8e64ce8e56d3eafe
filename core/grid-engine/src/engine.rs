//! FILENAME: core/grid-engine/src/engine.rs
//! Grid Engine - Turns a GridSpec into rendered rows, formats and geometry.
//!
//! Render order (load-bearing: it decides which label lands in which corner):
//!
//! ```text
//!      A     B     C     D
//! 1 |     | C1  | C2  |     | <- column header
//! 2 |     | SUM | SUM | SOS | <- column totals (totals header row)
//! 3 | R1  | DAT | DAT | SUM |
//! 4 | R2  | DAT | DAT | SUM |
//!   ^ row header        ^ row totals (totals column)
//! ```
//!
//! 1. Copy the data block (B3:C4) so the cached source is never touched.
//! 2. Columns first, ignoring the row header/totals columns:
//!    2.1. insert the totals header row (B2:C2)
//!    2.2. insert the column header row (B1:C1)
//! 3. Rows last, covering the rows added above:
//!    3.1. insert the row header column (A1:A4)
//!    3.2. append the totals column (D1:D4)
//!
//! The format matrix is built with the same steps, so `[i][j]` of both
//! always refer to the same rendered cell.

use std::sync::Arc;

use cell_engine::{Cell, CellData, CellFormat, CellValue, Offset};

use crate::definition::{
    Axis, AxisItem, AxisItems, ColumnTotals, DataFormat, DataSource, GridLayout, GridSpec,
    RowTotals,
};
use crate::error::{GridError, Result};
use crate::view::{DimensionProperties, GridData, GridRange, RowData};

/// A positioned, declaratively configured block of data with optional
/// headers and totals.
pub struct Grid<A = (), C = String, R = String> {
    pub(crate) layout: GridLayout,
    pub(crate) column: Axis<C>,
    pub(crate) row: Axis<R>,
    data: DataSource<A, C, R>,
    data_format: Option<DataFormat<C, R>>,

    /// Output of the last `generate` call.
    generated: Option<Vec<Vec<CellValue>>>,
}

fn flag(on: bool) -> u32 {
    u32::from(on)
}

fn sum_formula(range: String) -> CellValue {
    CellValue::Text(format!("=SUM({})", range))
}

impl<A, C, R> Grid<A, C, R> {
    pub fn new(spec: GridSpec<A, C, R>) -> Self {
        let GridSpec {
            layout,
            column,
            row,
            data,
            data_format,
        } = spec;

        Grid {
            layout,
            column,
            row,
            data,
            data_format,
            generated: None,
        }
    }

    // ========================================================================
    // CONFIGURATION ACCESSORS
    // ========================================================================

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn sheet(&self) -> Option<&str> {
        self.layout.sheet.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.layout.name.as_deref()
    }

    pub fn start_column(&self) -> u32 {
        self.layout.start_column
    }

    pub fn start_row(&self) -> u32 {
        self.layout.start_row
    }

    pub fn column_axis(&self) -> &Axis<C> {
        &self.column
    }

    pub fn row_axis(&self) -> &Axis<R> {
        &self.row
    }

    pub fn shows_column_header(&self) -> bool {
        self.column.shows_header()
    }

    pub fn shows_row_header(&self) -> bool {
        self.row.shows_header()
    }

    pub fn column_totals(&self) -> Option<&ColumnTotals> {
        self.layout.totals.column.as_ref()
    }

    pub fn row_totals(&self) -> Option<&RowTotals> {
        self.layout.totals.row.as_ref()
    }

    fn has_column_totals(&self) -> bool {
        self.layout.totals.column.is_some()
    }

    fn has_row_totals(&self) -> bool {
        self.layout.totals.row.is_some()
    }

    // ========================================================================
    // DATA
    // ========================================================================

    /// Runs the generator over every (column, row) pair and caches the result.
    ///
    /// Items are passed as `None` on an axis without declared items, which
    /// then has length 1.
    pub fn generate(&mut self, args: &A) -> Result<&[Vec<CellValue>]> {
        let generator = match &self.data {
            DataSource::Generator(f) => Arc::clone(f),
            DataSource::Values(_) => return Err(GridError::NoGenerator),
        };

        let columns = self.data_column_length();
        let rows = self.data_row_length();
        log::debug!(target: "grid", "generate name={:?} rows={} columns={}", self.layout.name, rows, columns);

        let data: Vec<Vec<CellValue>> = (0..rows)
            .map(|ri| {
                (0..columns)
                    .map(|ci| generator(self.column.item(ci), ci, self.row.item(ri), ri, args))
                    .collect()
            })
            .collect();

        Ok(self.generated.insert(data).as_slice())
    }

    /// True once data can be rendered without calling `generate`.
    pub fn is_ready(&self) -> bool {
        match &self.data {
            DataSource::Values(_) => true,
            DataSource::Generator(_) => self.generated.is_some(),
        }
    }

    /// The raw data block, before headers and totals.
    pub fn source_data(&self) -> Result<&[Vec<CellValue>]> {
        match &self.data {
            DataSource::Values(rows) => Ok(rows.as_slice()),
            DataSource::Generator(_) => self.generated.as_deref().ok_or(GridError::NotGenerated),
        }
    }

    // ========================================================================
    // METRICS
    // ========================================================================

    /// Data columns: declared column items, else the data's width.
    pub fn data_column_length(&self) -> usize {
        match (&self.column, &self.data) {
            (Axis::Items(axis), _) => axis.len(),
            (Axis::Inferred, DataSource::Values(rows)) => rows.first().map_or(0, Vec::len),
            (Axis::Inferred, DataSource::Generator(_)) => 1,
        }
    }

    /// Data rows: declared row items, else the data's height.
    pub fn data_row_length(&self) -> usize {
        match (&self.row, &self.data) {
            (Axis::Items(axis), _) => axis.len(),
            (Axis::Inferred, DataSource::Values(rows)) => rows.len(),
            (Axis::Inferred, DataSource::Generator(_)) => 1,
        }
    }

    /// Rendered width: row header + data + totals column.
    pub fn column_length(&self) -> u32 {
        flag(self.shows_row_header()) + self.data_column_length() as u32 + flag(self.has_row_totals())
    }

    /// Rendered height: column header + totals row + data.
    pub fn row_length(&self) -> u32 {
        self.header_row_count() + self.data_row_length() as u32
    }

    /// Rows rendered above the data block.
    pub(crate) fn header_row_count(&self) -> u32 {
        flag(self.shows_column_header()) + flag(self.has_column_totals())
    }

    // ========================================================================
    // POINTERS
    // ========================================================================

    pub fn origin(&self) -> Cell {
        Cell {
            sheet: self.layout.sheet.clone(),
            column: self.layout.start_column,
            row: self.layout.start_row,
        }
    }

    /// The first data cell.
    pub fn data_origin(&self) -> Cell {
        self.origin()
            .relative(Offset::new(flag(self.shows_row_header()), self.header_row_count()))
    }

    /// The full column header row, including the corner cells.
    pub fn column_header_range(&self) -> Option<String> {
        self.shows_column_header()
            .then(|| self.origin().to_range(Offset::right(self.column_length().saturating_sub(1))))
    }

    /// The full row header column, including the corner cells.
    pub fn row_header_range(&self) -> Option<String> {
        self.shows_row_header()
            .then(|| self.origin().to_range(Offset::bottom(self.row_length().saturating_sub(1))))
    }

    /// First SUM cell of the totals header row.
    pub fn column_total_header_origin(&self) -> Option<Cell> {
        self.has_column_totals().then(|| {
            self.origin().relative(Offset::new(
                flag(self.shows_row_header()),
                flag(self.shows_column_header()),
            ))
        })
    }

    /// First per-row SUM cell of the totals column.
    pub fn row_total_origin(&self) -> Option<Cell> {
        self.has_row_totals().then(|| {
            self.origin()
                .relative(Offset::new(self.column_length().saturating_sub(1), self.header_row_count()))
        })
    }

    /// The corner summing the totals header row.
    pub fn sum_of_sums_origin(&self) -> Option<Cell> {
        (self.has_column_totals() && self.has_row_totals()).then(|| {
            self.origin().relative(Offset::new(
                self.column_length().saturating_sub(1),
                flag(self.shows_column_header()),
            ))
        })
    }

    /// Bounding range of the rendered grid, sheet-prefixed when a sheet is set.
    pub fn to_range(&self) -> String {
        self.origin().to_range(self.extent())
    }

    /// Bounding range without the sheet prefix.
    pub fn to_local_range(&self) -> String {
        self.origin().to_local_range(self.extent())
    }

    fn extent(&self) -> Offset {
        Offset::new(
            self.column_length().saturating_sub(1),
            self.row_length().saturating_sub(1),
        )
    }

    pub fn to_grid_range(&self) -> GridRange {
        GridRange {
            start_row_index: self.layout.start_row,
            end_row_index: self.layout.start_row + self.row_length(),
            start_column_index: self.layout.start_column,
            end_column_index: self.layout.start_column + self.column_length(),
        }
    }

    // ========================================================================
    // TOTALS
    // ========================================================================

    /// One SUM per data column over that column's data cells.
    fn column_totals_values(&self) -> Vec<CellValue> {
        let data_origin = self.data_origin();
        let last_row = (self.data_row_length() as u32).saturating_sub(1);

        (0..self.data_column_length() as u32)
            .map(|i| {
                let top = data_origin.relative(Offset::right(i));
                sum_formula(top.to_local_range(Offset::bottom(last_row)))
            })
            .collect()
    }

    /// The totals column, top to bottom, covering the header rows too.
    fn row_totals_values(&self, totals: &RowTotals) -> Vec<CellValue> {
        let mut values = Vec::with_capacity(self.row_length() as usize);
        let last_column = (self.data_column_length() as u32).saturating_sub(1);

        if self.shows_column_header() {
            values.push(CellValue::text(totals.label.as_str()));
        }

        if let Some(origin) = self.column_total_header_origin() {
            values.push(sum_formula(origin.to_local_range(Offset::right(last_column))));
        }

        let data_origin = self.data_origin();
        values.extend((0..self.data_row_length() as u32).map(|i| {
            let first = data_origin.relative(Offset::bottom(i));
            sum_formula(first.to_local_range(Offset::right(last_column)))
        }));

        values
    }

    // ========================================================================
    // FORMATS
    // ========================================================================

    fn data_formats(&self) -> Vec<Vec<Option<CellFormat>>> {
        let columns = self.data_column_length();

        (0..self.data_row_length())
            .map(|ri| {
                (0..columns)
                    .map(|ci| {
                        self.data_format.as_ref().and_then(|format| {
                            format.resolve(self.column.item(ci), ci, self.row.item(ri), ri)
                        })
                    })
                    .collect()
            })
            .collect()
    }
}

impl<A, C: AxisItem, R: AxisItem> Grid<A, C, R> {
    /// The rendered grid: data plus every enabled header and total.
    ///
    /// Each call works on a fresh copy of the source, so repeated calls
    /// return equal results.
    pub fn data(&self) -> Result<Vec<Vec<CellValue>>> {
        let mut rows: Vec<Vec<CellValue>> = self.source_data()?.to_vec();

        // columns first; the row header and totals columns are not there yet
        if self.has_column_totals() {
            rows.insert(0, self.column_totals_values());
        }

        if let Some(axis) = shown_header(&self.column) {
            rows.insert(0, axis.labels());
        }

        // rows last; these cover the header rows added above
        if self.shows_row_header() {
            let labels = self.row_header_values();
            for (i, row) in rows.iter_mut().enumerate() {
                row.insert(0, labels.get(i).cloned().unwrap_or_default());
            }
        }

        if let Some(totals) = self.row_totals() {
            let values = self.row_totals_values(totals);
            for (i, row) in rows.iter_mut().enumerate() {
                row.push(values.get(i).cloned().unwrap_or_default());
            }
        }

        log::trace!(target: "grid", "render name={:?} rows={}", self.layout.name, rows.len());
        Ok(rows)
    }

    /// Format matrix aligned with `data()`.
    pub fn formats(&self) -> Vec<Vec<Option<CellFormat>>> {
        let columns = self.data_column_length();
        let mut rows = self.data_formats();

        if self.has_column_totals() {
            rows.insert(0, vec![None; columns]);
        }

        if let Some(axis) = shown_header(&self.column) {
            let header = match axis.header_format() {
                Some(format) => axis
                    .items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| format.resolve(item, i))
                    .collect(),
                None => vec![None; columns],
            };
            rows.insert(0, header);
        }

        if let Some(axis) = shown_header(&self.row) {
            let header_rows = self.header_row_count() as usize;
            let format = axis.header_format();
            for (i, row) in rows.iter_mut().enumerate() {
                let resolved = i.checked_sub(header_rows).and_then(|index| {
                    let item = axis.items.get(index)?;
                    format?.resolve(item, index)
                });
                row.insert(0, resolved);
            }
        }

        if let Some(totals) = self.row_totals() {
            let label_row = self.shows_column_header();
            for (i, row) in rows.iter_mut().enumerate() {
                let format = if label_row && i == 0 {
                    totals.label_format.clone()
                } else {
                    None
                };
                row.push(format);
            }
        }

        rows
    }

    /// Serializes the rendered grid into the API payload.
    pub fn to_grid_data(&self) -> Result<GridData> {
        let values = self.data()?;
        let formats = self.formats();

        let row_data = values
            .iter()
            .enumerate()
            .map(|(i, row)| RowData {
                values: row
                    .iter()
                    .enumerate()
                    .map(|(j, value)| {
                        let format = formats.get(i).and_then(|r| r.get(j)).cloned().flatten();
                        CellData::from_value(value).with_format(format)
                    })
                    .collect(),
            })
            .collect();

        log::debug!(
            target: "grid",
            "to_grid_data name={:?} range={} rows={} columns={}",
            self.layout.name,
            self.to_range(),
            self.row_length(),
            self.column_length()
        );

        Ok(GridData {
            start_column: self.layout.start_column,
            start_row: self.layout.start_row,
            row_data,
            column_metadata: self.column_metadata(),
        })
    }

    /// Generates first when the grid has a generator that has not run yet.
    pub fn to_grid_data_with(&mut self, args: &A) -> Result<GridData> {
        if !self.is_ready() {
            self.generate(args)?;
        }
        self.to_grid_data()
    }

    fn column_metadata(&self) -> Option<Vec<DimensionProperties>> {
        let row_total_size = self.row_totals().and_then(|t| t.pixel_size);
        let row_header_size = self.layout.row_header_pixel_size;
        let column_size = self.layout.column_pixel_size;

        if row_header_size.is_none() && column_size.is_none() && row_total_size.is_none() {
            return None;
        }

        let mut metadata = Vec::with_capacity(self.column_length() as usize);
        if self.shows_row_header() {
            metadata.push(DimensionProperties::sized(row_header_size));
        }
        metadata.extend(
            std::iter::repeat(DimensionProperties::sized(column_size)).take(self.data_column_length()),
        );
        if self.has_row_totals() {
            metadata.push(DimensionProperties::sized(row_total_size));
        }

        Some(metadata)
    }

    /// Row header column, top to bottom, covering the header rows too.
    fn row_header_values(&self) -> Vec<CellValue> {
        let mut values = Vec::with_capacity(self.row_length() as usize);

        if self.shows_column_header() {
            values.push(CellValue::text(self.layout.label.as_str()));
        }
        if let Some(totals) = self.column_totals() {
            values.push(CellValue::text(totals.label.as_str()));
        }

        match self.row.declared() {
            Some(axis) => values.extend(axis.labels()),
            None => values.extend(std::iter::repeat(CellValue::text("")).take(self.data_row_length())),
        }

        values
    }
}

fn shown_header<I>(axis: &Axis<I>) -> Option<&AxisItems<I>> {
    axis.declared().filter(|items| items.shows_header())
}
