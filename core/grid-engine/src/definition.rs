//! FILENAME: core/grid-engine/src/definition.rs
//! Grid Definition - The declarative configuration.
//!
//! This module contains all the types needed to DESCRIBE a grid:
//! - `GridLayout`: serializable placement, labels, totals and sizing
//! - `Axis`: the column/row items, their display labels and header formats
//! - `DataSource` / `DataFormat`: static values or a generator, and data formats
//!
//! Mutually exclusive options are tagged enums, so a shown header always has
//! items and a grid always has exactly one data source.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use cell_engine::{CellFormat, CellValue};

// ============================================================================
// AXIS ITEMS
// ============================================================================

/// An item that can label a column or row.
///
/// Implemented for strings and numbers. Custom item types implement it
/// directly or are given a converter on their axis.
pub trait AxisItem: PartialEq {
    fn label(&self) -> CellValue;
}

impl AxisItem for String {
    fn label(&self) -> CellValue {
        CellValue::Text(self.clone())
    }
}

impl AxisItem for &str {
    fn label(&self) -> CellValue {
        CellValue::Text((*self).to_string())
    }
}

impl AxisItem for f64 {
    fn label(&self) -> CellValue {
        CellValue::Number(*self)
    }
}

impl AxisItem for i32 {
    fn label(&self) -> CellValue {
        CellValue::from(*self)
    }
}

impl AxisItem for u32 {
    fn label(&self) -> CellValue {
        CellValue::from(*self)
    }
}

/// Maps an item and its index to the label shown in a header.
pub type Converter<I> = Arc<dyn Fn(&I, usize) -> CellValue + Send + Sync>;

/// Produces a header cell's format from its item and index.
pub type HeaderFormatFn<I> = Arc<dyn Fn(&I, usize) -> Option<CellFormat> + Send + Sync>;

/// How header cells are formatted. Applies to header cells only.
pub enum HeaderFormat<I> {
    /// Same format for every header cell.
    Uniform(CellFormat),
    /// One format per item index; missing indices stay unformatted.
    PerIndex(Vec<CellFormat>),
    Generated(HeaderFormatFn<I>),
}

impl<I> HeaderFormat<I> {
    pub fn generated(f: impl Fn(&I, usize) -> Option<CellFormat> + Send + Sync + 'static) -> Self {
        HeaderFormat::Generated(Arc::new(f))
    }

    pub fn resolve(&self, item: &I, index: usize) -> Option<CellFormat> {
        match self {
            HeaderFormat::Uniform(format) => Some(format.clone()),
            HeaderFormat::PerIndex(formats) => formats.get(index).cloned(),
            HeaderFormat::Generated(f) => f(item, index),
        }
    }
}

impl<I> Clone for HeaderFormat<I> {
    fn clone(&self) -> Self {
        match self {
            HeaderFormat::Uniform(format) => HeaderFormat::Uniform(format.clone()),
            HeaderFormat::PerIndex(formats) => HeaderFormat::PerIndex(formats.clone()),
            HeaderFormat::Generated(f) => HeaderFormat::Generated(Arc::clone(f)),
        }
    }
}

impl<I> fmt::Debug for HeaderFormat<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderFormat::Uniform(format) => f.debug_tuple("Uniform").field(format).finish(),
            HeaderFormat::PerIndex(formats) => f.debug_tuple("PerIndex").field(formats).finish(),
            HeaderFormat::Generated(_) => f.write_str("Generated(<fn>)"),
        }
    }
}

/// A rendered header band for an axis.
pub struct Header<I> {
    pub format: Option<HeaderFormat<I>>,
}

impl<I> Default for Header<I> {
    fn default() -> Self {
        Header { format: None }
    }
}

impl<I> Clone for Header<I> {
    fn clone(&self) -> Self {
        Header {
            format: self.format.clone(),
        }
    }
}

impl<I> fmt::Debug for Header<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Header").field("format", &self.format).finish()
    }
}

/// A declared, ordered list of items for one axis.
pub struct AxisItems<I> {
    pub items: Vec<I>,
    pub converter: Option<Converter<I>>,
    /// `Some` when a header row (columns) or header column (rows) is rendered.
    pub header: Option<Header<I>>,
}

impl<I> AxisItems<I> {
    pub fn new(items: Vec<I>) -> Self {
        AxisItems {
            items,
            converter: None,
            header: None,
        }
    }

    /// Renders a header band for this axis.
    pub fn with_header(mut self) -> Self {
        if self.header.is_none() {
            self.header = Some(Header::default());
        }
        self
    }

    /// Renders a header band with the given format.
    pub fn with_header_format(mut self, format: HeaderFormat<I>) -> Self {
        self.header = Some(Header {
            format: Some(format),
        });
        self
    }

    pub fn with_converter(
        mut self,
        converter: impl Fn(&I, usize) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        self.converter = Some(Arc::new(converter));
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn shows_header(&self) -> bool {
        self.header.is_some()
    }

    pub fn header_format(&self) -> Option<&HeaderFormat<I>> {
        self.header.as_ref().and_then(|h| h.format.as_ref())
    }
}

impl<I: AxisItem> AxisItems<I> {
    /// Display label of an item at its position on this axis.
    pub fn label_of(&self, item: &I, index: usize) -> CellValue {
        match &self.converter {
            Some(converter) => converter(item, index),
            None => item.label(),
        }
    }

    pub fn labels(&self) -> Vec<CellValue> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| self.label_of(item, i))
            .collect()
    }

    /// Position of `key` on this axis.
    ///
    /// Equality is tried first. When a converter is set, an item whose
    /// converted label equals the key's converted label (at the same index)
    /// also matches, so distinct items with equal labels are indistinguishable.
    pub fn index_of(&self, key: &I) -> Option<usize> {
        if let Some(index) = self.items.iter().position(|item| item == key) {
            return Some(index);
        }
        let converter = self.converter.as_ref()?;
        self.items
            .iter()
            .enumerate()
            .position(|(i, item)| converter(item, i) == converter(key, i))
    }
}

impl<I: Clone> Clone for AxisItems<I> {
    fn clone(&self) -> Self {
        AxisItems {
            items: self.items.clone(),
            converter: self.converter.clone(),
            header: self.header.clone(),
        }
    }
}

impl<I: fmt::Debug> fmt::Debug for AxisItems<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisItems")
            .field("items", &self.items)
            .field("converter", &self.converter.as_ref().map(|_| "<fn>"))
            .field("header", &self.header)
            .finish()
    }
}

/// Description of one axis of a grid.
pub enum Axis<I> {
    /// No declared items; the length comes from the data's shape.
    Inferred,
    Items(AxisItems<I>),
}

impl<I> Axis<I> {
    /// Declared items without a header.
    pub fn items(items: Vec<I>) -> Self {
        Axis::Items(AxisItems::new(items))
    }

    /// Declared items with a rendered header.
    pub fn with_header(items: Vec<I>) -> Self {
        Axis::Items(AxisItems::new(items).with_header())
    }

    pub fn declared(&self) -> Option<&AxisItems<I>> {
        match self {
            Axis::Inferred => None,
            Axis::Items(items) => Some(items),
        }
    }

    pub fn shows_header(&self) -> bool {
        self.declared().is_some_and(AxisItems::shows_header)
    }

    /// Item at `index`, if items are declared.
    pub fn item(&self, index: usize) -> Option<&I> {
        self.declared().and_then(|axis| axis.items.get(index))
    }
}

impl<I> Default for Axis<I> {
    fn default() -> Self {
        Axis::Inferred
    }
}

impl<I> From<AxisItems<I>> for Axis<I> {
    fn from(items: AxisItems<I>) -> Self {
        Axis::Items(items)
    }
}

impl<I: Clone> Clone for Axis<I> {
    fn clone(&self) -> Self {
        match self {
            Axis::Inferred => Axis::Inferred,
            Axis::Items(items) => Axis::Items(items.clone()),
        }
    }
}

impl<I: fmt::Debug> fmt::Debug for Axis<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Inferred => f.write_str("Inferred"),
            Axis::Items(items) => f.debug_tuple("Items").field(items).finish(),
        }
    }
}

// ============================================================================
// DATA
// ============================================================================

/// Produces one data cell from (column item, column index, row item, row index, args).
pub type DataGenerator<A, C, R> =
    Arc<dyn Fn(Option<&C>, usize, Option<&R>, usize, &A) -> CellValue + Send + Sync>;

/// Produces one data cell's format from (column item, column index, row item, row index).
pub type DataFormatFn<C, R> =
    Arc<dyn Fn(Option<&C>, usize, Option<&R>, usize) -> Option<CellFormat> + Send + Sync>;

/// Where the data block comes from.
pub enum DataSource<A, C, R> {
    /// A fixed row-major block.
    Values(Vec<Vec<CellValue>>),
    /// Generated on demand by `Grid::generate`, then cached.
    Generator(DataGenerator<A, C, R>),
}

impl<A, C, R> DataSource<A, C, R> {
    pub fn values<T: Into<CellValue>>(rows: Vec<Vec<T>>) -> Self {
        DataSource::Values(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    pub fn generator(
        f: impl Fn(Option<&C>, usize, Option<&R>, usize, &A) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        DataSource::Generator(Arc::new(f))
    }
}

impl<A, C, R> Clone for DataSource<A, C, R> {
    fn clone(&self) -> Self {
        match self {
            DataSource::Values(rows) => DataSource::Values(rows.clone()),
            DataSource::Generator(f) => DataSource::Generator(Arc::clone(f)),
        }
    }
}

impl<A, C, R> fmt::Debug for DataSource<A, C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Values(rows) => f.debug_tuple("Values").field(rows).finish(),
            DataSource::Generator(_) => f.write_str("Generator(<fn>)"),
        }
    }
}

/// How data cells are formatted. Applies to data cells only.
pub enum DataFormat<C, R> {
    Uniform(CellFormat),
    /// Row-major, indexed like the data block; missing entries stay unformatted.
    PerCell(Vec<Vec<CellFormat>>),
    Generated(DataFormatFn<C, R>),
}

impl<C, R> DataFormat<C, R> {
    pub fn generated(
        f: impl Fn(Option<&C>, usize, Option<&R>, usize) -> Option<CellFormat> + Send + Sync + 'static,
    ) -> Self {
        DataFormat::Generated(Arc::new(f))
    }

    pub fn resolve(
        &self,
        column: Option<&C>,
        column_index: usize,
        row: Option<&R>,
        row_index: usize,
    ) -> Option<CellFormat> {
        match self {
            DataFormat::Uniform(format) => Some(format.clone()),
            DataFormat::PerCell(rows) => rows
                .get(row_index)
                .and_then(|r| r.get(column_index))
                .cloned(),
            DataFormat::Generated(f) => f(column, column_index, row, row_index),
        }
    }
}

impl<C, R> Clone for DataFormat<C, R> {
    fn clone(&self) -> Self {
        match self {
            DataFormat::Uniform(format) => DataFormat::Uniform(format.clone()),
            DataFormat::PerCell(rows) => DataFormat::PerCell(rows.clone()),
            DataFormat::Generated(f) => DataFormat::Generated(Arc::clone(f)),
        }
    }
}

impl<C, R> fmt::Debug for DataFormat<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataFormat::Uniform(format) => f.debug_tuple("Uniform").field(format).finish(),
            DataFormat::PerCell(rows) => f.debug_tuple("PerCell").field(rows).finish(),
            DataFormat::Generated(_) => f.write_str("Generated(<fn>)"),
        }
    }
}

// ============================================================================
// LAYOUT OPTIONS
// ============================================================================

fn default_total_label() -> String {
    "SUM".to_string()
}

/// Totals header row: one SUM per data column, placed above the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTotals {
    /// Shown in the row header column, beside the totals row.
    #[serde(default = "default_total_label")]
    pub label: String,
}

impl Default for ColumnTotals {
    fn default() -> Self {
        ColumnTotals {
            label: default_total_label(),
        }
    }
}

/// Totals column: one SUM per data row, placed right of the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowTotals {
    /// Shown in the column header row, above the totals column.
    #[serde(default = "default_total_label")]
    pub label: String,

    #[serde(default)]
    pub label_format: Option<CellFormat>,

    #[serde(default)]
    pub pixel_size: Option<u32>,
}

impl Default for RowTotals {
    fn default() -> Self {
        RowTotals {
            label: default_total_label(),
            label_format: None,
            pixel_size: None,
        }
    }
}

/// Which totals are rendered. The sum-of-sums corner appears when both are.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Totals {
    #[serde(default)]
    pub column: Option<ColumnTotals>,

    #[serde(default)]
    pub row: Option<RowTotals>,
}

impl Totals {
    pub fn both() -> Self {
        Totals {
            column: Some(ColumnTotals::default()),
            row: Some(RowTotals::default()),
        }
    }
}

/// Placement, labelling and sizing of a grid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GridLayout {
    #[serde(default)]
    pub sheet: Option<String>,

    /// Identifier for callers; never rendered.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub start_column: u32,

    #[serde(default)]
    pub start_row: u32,

    /// Top-left corner text, shown when both headers are rendered.
    #[serde(default)]
    pub label: String,

    /// Width of every data column.
    #[serde(default)]
    pub column_pixel_size: Option<u32>,

    /// Width of the row header column.
    #[serde(default)]
    pub row_header_pixel_size: Option<u32>,

    #[serde(default)]
    pub totals: Totals,
}

// ============================================================================
// MAIN DEFINITION STRUCT
// ============================================================================

/// Everything needed to construct a `Grid`.
///
/// `A` is the argument type passed to a data generator, `C` and `R` the
/// column and row item types.
pub struct GridSpec<A, C, R> {
    pub layout: GridLayout,
    pub column: Axis<C>,
    pub row: Axis<R>,
    pub data: DataSource<A, C, R>,
    pub data_format: Option<DataFormat<C, R>>,
}

impl<A, C, R> GridSpec<A, C, R> {
    /// A spec with default layout and inferred axes.
    pub fn new(data: DataSource<A, C, R>) -> Self {
        GridSpec {
            layout: GridLayout::default(),
            column: Axis::Inferred,
            row: Axis::Inferred,
            data,
            data_format: None,
        }
    }
}
