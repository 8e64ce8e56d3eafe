//! FILENAME: core/grid-engine/src/lib.rs
//! Grid layout subsystem.
//!
//! Builds rectangular spreadsheet layouts (header bands, totals, data body)
//! on top of `cell-engine` addressing and renders them to grid data payloads.
//!
//! Layers:
//! - `definition`: Configuration (what the grid IS)
//! - `engine`: Geometry, data generation and rendering (HOW it is laid out)
//! - `lookup`: Cell lookups and XLOOKUP formulas over a laid-out grid
//! - `compose`: Placing grids next to each other
//! - `header_map`: Header row of MAP formulas over a row-label column
//! - `view`: Serialized output (WHAT is written to the sheet)

pub mod compose;
pub mod definition;
pub mod engine;
pub mod error;
pub mod header_map;
pub mod lookup;
pub mod view;

pub use compose::{create_lower_grid, create_right_grid, GridBounds};
pub use definition::*;
pub use engine::Grid;
pub use error::{AxisKind, GridError, Result};
pub use header_map::{HeaderAndMapGrid, HeaderAndMapGridSpec, Lambda, LambdaFn, MapAxis, MapLayout};
pub use lookup::LookupLabel;
pub use view::*;

pub use cell_engine::{Cell, CellFormat, CellValue, Offset, RangeEnd};
