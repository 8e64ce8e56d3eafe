//! FILENAME: core/grid-engine/tests/common/mod.rs
//! Shared fixtures for the grid-engine integration tests.

#![allow(dead_code)]

use grid_engine::{Axis, CellValue, DataSource, Grid, GridLayout, GridSpec, Totals};

/// Arguments handed to generator-backed grids.
pub struct Args {
    pub hoge: String,
}

pub fn args() -> Args {
    Args {
        hoge: "fuga".to_string(),
    }
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn text(s: &str) -> CellValue {
    CellValue::text(s)
}

/// Renders `args:column:i/row:j`, with `undefined` for a missing item.
pub fn describe_cell(column: Option<&String>, i: usize, row: Option<&String>, j: usize, args: &Args) -> CellValue {
    let column = column.map_or("undefined", String::as_str);
    let row = row.map_or("undefined", String::as_str);
    CellValue::Text(format!("{}:{}:{}/{}:{}", args.hoge, column, i, row, j))
}

/// Generator grid with both headers and both totals.
pub fn generated_grid(sheet: Option<&str>, columns: &[&str], rows: &[&str]) -> Grid<Args> {
    Grid::new(GridSpec {
        layout: GridLayout {
            sheet: sheet.map(str::to_string),
            totals: Totals::both(),
            ..GridLayout::default()
        },
        column: Axis::with_header(strings(columns)),
        row: Axis::with_header(strings(rows)),
        ..GridSpec::new(DataSource::generator(describe_cell))
    })
}
