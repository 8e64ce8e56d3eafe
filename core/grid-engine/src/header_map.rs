//! FILENAME: core/grid-engine/src/header_map.rs
//! Header-and-map grid: a header row of array formulas over a row-label column.
//!
//! ```text
//!      A       B                         C
//! 1 | label | = {"c1"; MAP(A2:A4, λ)} | = {"c2"; MAP(A2:A4, λ)} |
//! 2 | r1    |
//! 3 | r2    |
//! ```
//!
//! Each header cell spills its label followed by the lambda mapped over the
//! row-label range, so the data area below the header stays empty.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use cell_engine::{Cell, CellData, CellValue, Offset};

use crate::compose::GridBounds;
use crate::definition::{AxisItem, AxisItems};
use crate::error::{GridError, Result};
use crate::lookup::string_literal;
use crate::view::{DimensionProperties, GridData, RowData};

/// Produces the lambda for one column from (column item, column index, args).
pub type LambdaFn<A, C> = Arc<dyn Fn(&C, usize, &A) -> String + Send + Sync>;

/// The lambda mapped over the row range in every header formula.
pub enum Lambda<A, C> {
    /// The same expression for every column, e.g. `LAMBDA(r, r * 2)`.
    Expression(String),
    Generated(LambdaFn<A, C>),
}

impl<A, C> Lambda<A, C> {
    pub fn generated(f: impl Fn(&C, usize, &A) -> String + Send + Sync + 'static) -> Self {
        Lambda::Generated(Arc::new(f))
    }
}

impl<A, C> fmt::Debug for Lambda<A, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lambda::Expression(expr) => f.debug_tuple("Expression").field(expr).finish(),
            Lambda::Generated(_) => f.write_str("Generated(<fn>)"),
        }
    }
}

/// Items of one axis plus the width of their column(s).
pub struct MapAxis<I> {
    /// Labels, converter and header format. The header is always rendered.
    pub items: AxisItems<I>,
    pub pixel_size: Option<u32>,
}

impl<I> MapAxis<I> {
    pub fn new(items: AxisItems<I>) -> Self {
        MapAxis {
            items,
            pixel_size: None,
        }
    }

    pub fn with_pixel_size(mut self, pixel_size: u32) -> Self {
        self.pixel_size = Some(pixel_size);
        self
    }
}

impl<I> From<Vec<I>> for MapAxis<I> {
    fn from(items: Vec<I>) -> Self {
        MapAxis::new(AxisItems::new(items))
    }
}

/// Placement and corner label.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapLayout {
    #[serde(default)]
    pub sheet: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub start_column: u32,

    #[serde(default)]
    pub start_row: u32,

    #[serde(default)]
    pub label: String,
}

pub struct HeaderAndMapGridSpec<A, C, R> {
    pub layout: MapLayout,
    pub column: MapAxis<C>,
    pub row: MapAxis<R>,
    pub lambda: Lambda<A, C>,
}

pub struct HeaderAndMapGrid<A = (), C = String, R = String> {
    layout: MapLayout,
    column: MapAxis<C>,
    row: MapAxis<R>,
    lambda: Lambda<A, C>,
}

/// Indents every line of `text`, optionally leaving the first line as is.
fn indent(text: &str, width: usize, except_first_line: bool) -> String {
    let pad = " ".repeat(width);
    text.split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i == 0 && except_first_line {
                line.to_string()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl<A, C, R> HeaderAndMapGrid<A, C, R> {
    pub fn new(spec: HeaderAndMapGridSpec<A, C, R>) -> Self {
        HeaderAndMapGrid {
            layout: spec.layout,
            column: spec.column,
            row: spec.row,
            lambda: spec.lambda,
        }
    }

    pub fn layout(&self) -> &MapLayout {
        &self.layout
    }

    pub fn origin(&self) -> Cell {
        Cell {
            sheet: self.layout.sheet.clone(),
            column: self.layout.start_column,
            row: self.layout.start_row,
        }
    }

    /// Range mapped by every header formula: from the first row label down
    /// by the number of row items.
    pub fn rows_range(&self) -> String {
        self.origin()
            .relative(Offset::bottom(1))
            .to_range(Offset::bottom(self.row.items.len() as u32))
    }

    fn header_formula(label: &CellValue, rows_range: &str, lambda: &str) -> String {
        format!(
            "= {{\n  {};\n  MAP({}, {})\n}}",
            string_literal(&label.display()),
            rows_range,
            indent(lambda, 2, true)
        )
    }

    fn column_metadata(&self) -> Option<Vec<DimensionProperties>> {
        if self.row.pixel_size.is_none() && self.column.pixel_size.is_none() {
            return None;
        }

        let mut metadata = vec![DimensionProperties::sized(self.row.pixel_size)];
        if let Some(size) = self.column.pixel_size {
            metadata.extend(std::iter::repeat(DimensionProperties::sized(Some(size))).take(self.column.items.len()));
        }
        Some(metadata)
    }
}

impl<A, C: AxisItem, R: AxisItem> HeaderAndMapGrid<A, C, R> {
    /// Serializes the grid. Fails when the lambda is generated, since that
    /// needs arguments.
    pub fn to_grid_data(&self) -> Result<GridData> {
        self.build(None)
    }

    pub fn to_grid_data_with(&self, args: &A) -> Result<GridData> {
        self.build(Some(args))
    }

    fn build(&self, args: Option<&A>) -> Result<GridData> {
        let rows_range = self.rows_range();
        let columns = &self.column.items;
        let rows = &self.row.items;

        let mut header = Vec::with_capacity(columns.len() + 1);
        header.push(CellData::from_value(&CellValue::text(self.layout.label.as_str())));

        for (i, item) in columns.items.iter().enumerate() {
            let lambda = match &self.lambda {
                Lambda::Expression(expr) => expr.clone(),
                Lambda::Generated(f) => f(item, i, args.ok_or(GridError::LambdaArgsRequired)?),
            };
            let formula = Self::header_formula(&columns.label_of(item, i), &rows_range, &lambda);
            let format = columns.header_format().and_then(|f| f.resolve(item, i));
            header.push(CellData::from_value(&CellValue::Text(formula)).with_format(format));
        }

        let mut row_data = Vec::with_capacity(rows.len() + 1);
        row_data.push(RowData { values: header });
        row_data.extend(rows.items.iter().enumerate().map(|(i, item)| {
            let format = rows.header_format().and_then(|f| f.resolve(item, i));
            RowData {
                values: vec![CellData::from_value(&rows.label_of(item, i)).with_format(format)],
            }
        }));

        log::debug!(
            target: "header_map",
            "to_grid_data name={:?} columns={} rows={} rows_range={}",
            self.layout.name,
            columns.len(),
            rows.len(),
            rows_range
        );

        Ok(GridData {
            start_column: self.layout.start_column,
            start_row: self.layout.start_row,
            row_data,
            column_metadata: self.column_metadata(),
        })
    }
}

impl<A, C, R> GridBounds for HeaderAndMapGrid<A, C, R> {
    fn sheet(&self) -> Option<&str> {
        self.layout.sheet.as_deref()
    }

    fn start_column(&self) -> u32 {
        self.layout.start_column
    }

    fn start_row(&self) -> u32 {
        self.layout.start_row
    }

    fn column_length(&self) -> u32 {
        1 + self.column.items.len() as u32
    }

    fn row_length(&self) -> u32 {
        1 + self.row.items.len() as u32
    }
}
