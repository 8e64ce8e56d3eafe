//! FILENAME: core/grid-engine/src/error.rs

use std::fmt;

use thiserror::Error;

/// Which axis of a grid an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    Column,
    Row,
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisKind::Column => f.write_str("column"),
            AxisKind::Row => f.write_str("row"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("no data given: set values or call generate on a grid with a generator")]
    NotGenerated,

    #[error("no data generator set")]
    NoGenerator,

    #[error("invalid lookup keys: {0}")]
    LookupKeys(&'static str),

    #[error("column and row headers must both be shown to build a lookup formula")]
    HeadersRequired,

    #[error("{0} item not found")]
    ItemNotFound(AxisKind),

    #[error("{0} item has an empty display label")]
    EmptyLabel(AxisKind),

    #[error("lambda generator needs arguments: use to_grid_data_with")]
    LambdaArgsRequired,
}

pub type Result<T> = std::result::Result<T, GridError>;
