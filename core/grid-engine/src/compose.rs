//! FILENAME: core/grid-engine/src/compose.rs
//! Places new grids beside or below existing ones for dashboard-like layouts.
//!
//! Only the placement is derived from the neighbour; the grids share no state.

use cell_engine::Cell;

use crate::definition::GridSpec;
use crate::engine::Grid;

/// Position and rendered size of anything placed on a sheet.
pub trait GridBounds {
    fn sheet(&self) -> Option<&str>;
    fn start_column(&self) -> u32;
    fn start_row(&self) -> u32;
    /// Rendered width in columns.
    fn column_length(&self) -> u32;
    /// Rendered height in rows.
    fn row_length(&self) -> u32;

    fn origin(&self) -> Cell {
        Cell {
            sheet: self.sheet().map(str::to_string),
            column: self.start_column(),
            row: self.start_row(),
        }
    }
}

impl<A, C, R> GridBounds for Grid<A, C, R> {
    fn sheet(&self) -> Option<&str> {
        Grid::sheet(self)
    }

    fn start_column(&self) -> u32 {
        Grid::start_column(self)
    }

    fn start_row(&self) -> u32 {
        Grid::start_row(self)
    }

    fn column_length(&self) -> u32 {
        Grid::column_length(self)
    }

    fn row_length(&self) -> u32 {
        Grid::row_length(self)
    }
}

/// Fills in the sheet from the neighbour unless the spec names one.
fn inherit_sheet<A, C, R>(from: &impl GridBounds, spec: &mut GridSpec<A, C, R>) {
    if spec.layout.sheet.is_none() {
        spec.layout.sheet = from.sheet().map(str::to_string);
    }
}

/// A grid starting `margin` columns right of `from`, top-aligned with it.
pub fn create_right_grid<A, C, R>(from: &impl GridBounds, margin: u32, mut spec: GridSpec<A, C, R>) -> Grid<A, C, R> {
    inherit_sheet(from, &mut spec);
    spec.layout.start_column = from.start_column() + from.column_length() + margin;
    spec.layout.start_row = from.start_row();

    log::debug!(
        target: "compose",
        "right_of from={} start_column={} start_row={}",
        from.origin(),
        spec.layout.start_column,
        spec.layout.start_row
    );
    Grid::new(spec)
}

/// A grid starting `margin` rows below `from`, left-aligned with it.
pub fn create_lower_grid<A, C, R>(from: &impl GridBounds, margin: u32, mut spec: GridSpec<A, C, R>) -> Grid<A, C, R> {
    inherit_sheet(from, &mut spec);
    spec.layout.start_column = from.start_column();
    spec.layout.start_row = from.start_row() + from.row_length() + margin;

    log::debug!(
        target: "compose",
        "below from={} start_column={} start_row={}",
        from.origin(),
        spec.layout.start_column,
        spec.layout.start_row
    );
    Grid::new(spec)
}
